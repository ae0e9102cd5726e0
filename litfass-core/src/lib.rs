pub mod account;
pub mod feed;
pub mod graph;
pub mod post;

#[cfg(test)]
mod testutil;
