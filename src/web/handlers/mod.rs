pub mod carousel;
pub mod generate;
pub mod proxy;
