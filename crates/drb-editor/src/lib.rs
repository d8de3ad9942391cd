pub mod affordance;
pub mod input;
pub mod machine;
pub mod session;
pub mod view;
