// Controllers own a repository handle and expose:
// - one async method per HTTP verb, returning something `IntoResponse`
// - `base_path()` and `router()` for mounting into the application
//
// Route closures hold an `Arc` of the controller and forward extracted
// arguments to the verb methods.

mod foobars;

pub use foobars::FooBarsController;
