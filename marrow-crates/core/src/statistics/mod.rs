//! Statistics of the engine and the way they are reported.
pub(crate) mod statistic_logger;
pub(crate) mod statistic_logging;

use std::fmt::Display;

pub use statistic_logger::StatisticLogger;
pub use statistic_logging::configure_statistic_logging;
pub use statistic_logging::log_statistic;
pub use statistic_logging::log_statistic_postfix;
pub use statistic_logging::should_log_statistics;
pub use statistic_logging::StatisticOptions;

/// A value, or group of values, that can be written through a [`StatisticLogger`].
///
/// Structs of counters are best generated with [`create_statistics_struct!`](crate::create_statistics_struct).
pub trait Statistic {
    fn log(&self, statistic_logger: StatisticLogger);
}

impl<Value: Display> Statistic for Value {
    fn log(&self, statistic_logger: StatisticLogger) {
        statistic_logger.log(self);
    }
}

/// Generates a struct of counters which implements [`Statistic`] by logging every field under
/// its own name.
///
/// # Example
/// ```rust
/// # use marrow_core::create_statistics_struct;
/// create_statistics_struct!(
///     /// Counters of a hypothetical component.
///     pub ComponentStatistics {
///         calls: u64,
///     }
/// );
///
/// let statistics = ComponentStatistics::default();
/// assert_eq!(statistics.calls, 0);
/// ```
#[macro_export]
macro_rules! create_statistics_struct {
    ($(#[$struct_documentation:meta])* $vis:vis $name:ident { $($(#[$field_documentation:meta])* $field:ident : $type:ty),+ $(,)? }) => {
        $(#[$struct_documentation])*
        #[derive(Default, Debug, Copy, Clone, PartialEq)]
        $vis struct $name {
            $($(#[$field_documentation])* pub $field: $type),+
        }

        impl $crate::statistics::Statistic for $name {
            fn log(&self, statistic_logger: $crate::statistics::StatisticLogger) {
                $($crate::statistics::Statistic::log(&self.$field, statistic_logger.attach_to_prefix(stringify!($field)));)+
            }
        }
    };
}
