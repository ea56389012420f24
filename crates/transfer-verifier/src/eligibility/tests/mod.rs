mod common;
mod risks;
