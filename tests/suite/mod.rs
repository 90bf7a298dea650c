mod annotations;
mod collector;
mod config;
