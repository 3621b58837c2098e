/// Variables which can be transformed into an affine view of themselves.
pub trait TransformableVariable<View> {
    /// The view `scale * self`.
    fn scaled(&self, scale: i32) -> View;

    /// The view `self + offset`.
    fn offset(&self, offset: i32) -> View;
}
