pub mod api;
mod client;

pub use client::YouTubeClient;
