#[cfg(test)]
mod common;
#[cfg(test)]
mod discord_rest_tests;
#[cfg(all(test, unix))]
mod shutdown_tests;
