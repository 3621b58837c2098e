mod notification_context;
mod propagation_context;

pub use notification_context::NotificationContext;
pub use propagation_context::PropagationContextMut;
