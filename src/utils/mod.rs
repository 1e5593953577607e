mod display;

pub use self::display::{banner, print_success};
