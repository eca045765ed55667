use proc_macro::TokenStream;

mod injectable;

/// Derive macro for building a struct out of the DI container
///
/// `Arc<dyn Trait>` fields resolve through trait bindings, `Arc<T>` fields
/// through concrete registrations. Fields marked `#[inject(default)]` are
/// filled with `Default::default()`.
///
/// # Example
/// ```ignore
/// use foobars::Injectable;
///
/// #[derive(Injectable)]
/// pub struct FooBarsController {
///     repository: Arc<dyn Repository<FooBar>>,
/// }
/// ```
#[proc_macro_derive(Injectable, attributes(inject))]
pub fn derive_injectable(input: TokenStream) -> TokenStream {
    injectable::derive_injectable(input)
}
