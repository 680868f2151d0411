pub mod commands;
pub mod persist;
pub mod session;

#[cfg(test)]
mod tests;
