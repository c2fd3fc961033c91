//! Rule-based extractors for tender text.

pub mod context;
pub mod money;
pub mod normalize;
pub mod patterns;
pub mod quantity;
pub mod registry;
pub mod validator;

pub use context::context_window;
pub use money::{format_brl_amount, parse_brl_amount, parse_price, MAX_AMOUNT};
pub use normalize::normalize;
pub use quantity::{parse_quantity, MAX_LEADING_QUANTITY};
pub use registry::{CategoryPattern, CategoryRegistry, STANDARD_PATTERNS};
pub use validator::{ItemValidator, Rejection};
