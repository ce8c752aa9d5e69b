mod artists;
mod cache;
mod feed;
