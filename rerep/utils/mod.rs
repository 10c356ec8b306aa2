#[cfg(test)]
pub mod testing;

#[cfg(test)]
pub mod stream;
