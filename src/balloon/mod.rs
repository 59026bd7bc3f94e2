pub(crate) mod error;
pub(crate) mod session;
#[cfg(test)]
mod tests;
