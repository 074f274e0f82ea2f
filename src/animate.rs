pub(crate) mod animator;
pub(crate) mod fade;
