/// User interface module
///
/// Widgets and layouts that turn derived views into iced elements:
/// - Landing page sections and cards (landing.rs)

pub mod landing;
