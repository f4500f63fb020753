use crate::Observable;

/// Primitive numeric types held by the numeric value aliases.
pub trait Number: Copy + PartialEq + 'static {
    fn as_i32(self) -> i32;
    fn as_i64(self) -> i64;
    fn as_f32(self) -> f32;
    fn as_f64(self) -> f64;
}

macro_rules! impl_number {
    ($($t:ty),*) => {
        $(
            impl Number for $t {
                fn as_i32(self) -> i32 {
                    self as i32
                }
                fn as_i64(self) -> i64 {
                    self as i64
                }
                fn as_f32(self) -> f32 {
                    self as f32
                }
                fn as_f64(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}
impl_number!(i32, i64, f32, f64);

/// Common supertype of observable numeric values, whatever their representation.
///
/// Conversions follow `as` casts, so floats truncate toward zero.
pub trait ObservableNumberValue: Observable {
    fn int_value(&self) -> i32;
    fn long_value(&self) -> i64;
    fn float_value(&self) -> f32;
    fn double_value(&self) -> f64;
}
