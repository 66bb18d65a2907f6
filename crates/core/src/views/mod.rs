pub mod form;

pub use form::render_form;
