use darling::{ast, FromDeriveInput, FromField};
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{quote, quote_spanned};
use syn::spanned::Spanned;
use syn::{parse_macro_input, DeriveInput, GenericArgument, PathArguments, Type};

#[derive(FromDeriveInput)]
#[darling(supports(struct_named))]
struct InjectableInput {
    ident: syn::Ident,
    generics: syn::Generics,
    data: ast::Data<(), InjectableField>,
}

#[derive(FromField)]
#[darling(attributes(inject))]
struct InjectableField {
    ident: Option<syn::Ident>,
    ty: Type,
    /// Build the field with `Default::default()` instead of the container.
    #[darling(default)]
    default: bool,
}

pub fn derive_injectable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match InjectableInput::from_derive_input(&input) {
        Ok(parsed) => TokenStream::from(generate_injectable_impl(&parsed)),
        Err(e) => TokenStream::from(e.write_errors()),
    }
}

fn generate_injectable_impl(input: &InjectableInput) -> TokenStream2 {
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        ast::Data::Struct(fields) => &fields.fields,
        ast::Data::Enum(_) => unreachable!("darling rejects enums through `supports`"),
    };

    let field_injections = fields.iter().map(field_injection);

    quote! {
        impl #impl_generics ::foobars::Injectable for #struct_name #ty_generics #where_clause {
            fn inject(
                container: &::foobars::Container
            ) -> ::foobars::Result<Self> {
                Ok(Self {
                    #(#field_injections),*
                })
            }
        }
    }
}

fn field_injection(field: &InjectableField) -> TokenStream2 {
    let field_name = &field.ident;

    if field.default {
        return quote! { #field_name: ::core::default::Default::default() };
    }

    match arc_inner_type(&field.ty) {
        Some(inner) if matches!(inner, Type::TraitObject(_)) => {
            quote! { #field_name: container.resolve_trait::<#inner>()? }
        }
        Some(inner) => quote! { #field_name: container.resolve::<#inner>()? },
        None => quote_spanned! { field.ty.span() =>
            #field_name: ::core::compile_error!(
                "injected fields must be `Arc<T>` or `Arc<dyn Trait>`; mark other fields `#[inject(default)]`"
            )
        },
    }
}

/// The `T` of an `Arc<T>` field, if the field is an `Arc`.
fn arc_inner_type(ty: &Type) -> Option<&Type> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    let segment = type_path.path.segments.last()?;
    if segment.ident != "Arc" {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    match args.args.first()? {
        GenericArgument::Type(inner) => Some(inner),
        _ => None,
    }
}
