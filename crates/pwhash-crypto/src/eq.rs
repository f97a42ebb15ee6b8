/// Equality whose running time does not depend on where two values first differ.
///
/// Values of different lengths compare unequal; only the length is leaked.
pub trait ConstantTimeEq {
    fn eq(&self, other: &Self) -> bool;
}

impl ConstantTimeEq for &[u8] {
    fn eq(&self, other: &Self) -> bool {
        subtle::ConstantTimeEq::ct_eq(*self, *other).into()
    }
}

impl ConstantTimeEq for &str {
    fn eq(&self, other: &Self) -> bool {
        ConstantTimeEq::eq(&self.as_bytes(), &other.as_bytes())
    }
}
