//! Type classification for the derive macro.
//!
//! The generated `Display` impl needs to know three things about a field's
//! type: whether it is an `Option` (absent values print as `null`), whether
//! it is an array-like container (printed through `Debug` for elementwise
//! content output), and whether it is a bare generic parameter. Everything
//! else prints through `Display`.

use redacted_core::TypeShape;

/// A field type reduced to what string output cares about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct FieldShape {
    pub(crate) shape: TypeShape,
    pub(crate) nullable: bool,
}

/// Classifies a field type against the container's generic parameters.
///
/// `Option<T>` is unwrapped one level and marks the field nullable; the
/// classification then applies to `T`.
pub(crate) fn classify_type(ty: &syn::Type, generics: &syn::Generics) -> FieldShape {
    if let Some(inner) = option_inner(ty) {
        return FieldShape {
            shape: classify_bare(inner, generics),
            nullable: true,
        };
    }
    FieldShape {
        shape: classify_bare(ty, generics),
        nullable: false,
    }
}

fn classify_bare(ty: &syn::Type, generics: &syn::Generics) -> TypeShape {
    match ty {
        syn::Type::Array(array) => element_array_shape(&array.elem),
        syn::Type::Slice(slice) => element_array_shape(&slice.elem),
        syn::Type::Reference(reference) => classify_bare(&reference.elem, generics),
        syn::Type::Path(path) => {
            if let Some(inner) = vec_inner(ty) {
                return element_array_shape(inner);
            }
            if is_generic_param(path, generics) {
                return TypeShape::Generic;
            }
            TypeShape::Scalar
        }
        _ => TypeShape::Scalar,
    }
}

fn element_array_shape(element: &syn::Type) -> TypeShape {
    if is_scalar_primitive(element) {
        TypeShape::PrimitiveArray
    } else {
        TypeShape::ReferenceArray
    }
}

/// Checks if a type is a recognized scalar primitive.
///
/// Returns `true` for bare primitive type names like `i32`, `bool`, `f64`.
/// Returns `false` for qualified paths, generic types, or type aliases.
fn is_scalar_primitive(ty: &syn::Type) -> bool {
    let syn::Type::Path(path) = ty else {
        return false;
    };
    if path.path.leading_colon.is_some() || path.path.segments.len() != 1 {
        return false;
    }
    let Some(segment) = path.path.segments.last() else {
        return false;
    };
    if !segment.arguments.is_empty() {
        return false;
    }
    matches!(
        segment.ident.to_string().as_str(),
        "i8" | "i16"
            | "i32"
            | "i64"
            | "i128"
            | "isize"
            | "u8"
            | "u16"
            | "u32"
            | "u64"
            | "u128"
            | "usize"
            | "f32"
            | "f64"
            | "bool"
            | "char"
    )
}

fn is_generic_param(path: &syn::TypePath, generics: &syn::Generics) -> bool {
    if path.qself.is_some() || path.path.leading_colon.is_some() || path.path.segments.len() != 1 {
        return false;
    }
    let segment = &path.path.segments[0];
    segment.arguments.is_empty()
        && generics
            .type_params()
            .any(|param| param.ident == segment.ident)
}

/// Returns the payload type of a simple `Option<T>` path.
fn option_inner(ty: &syn::Type) -> Option<&syn::Type> {
    single_argument_of(ty, "Option")
}

/// Returns the element type of a simple `Vec<T>` path.
fn vec_inner(ty: &syn::Type) -> Option<&syn::Type> {
    single_argument_of(ty, "Vec")
}

fn single_argument_of<'a>(ty: &'a syn::Type, name: &str) -> Option<&'a syn::Type> {
    let syn::Type::Path(path) = ty else {
        return None;
    };
    if path.path.segments.len() != 1 {
        return None;
    }
    let segment = path.path.segments.first()?;
    if segment.ident != name {
        return None;
    }
    let syn::PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    if args.args.len() != 1 {
        return None;
    }
    match args.args.first()? {
        syn::GenericArgument::Type(inner) => Some(inner),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use quote::quote;

    use super::*;

    fn parse_type(tokens: proc_macro2::TokenStream) -> syn::Type {
        syn::parse2(tokens).expect("should parse as Type")
    }

    fn no_generics() -> syn::Generics {
        syn::Generics::default()
    }

    #[test]
    fn plain_types_are_scalar() {
        for tokens in [quote!(i32), quote!(String), quote!(std::net::IpAddr)] {
            let shape = classify_type(&parse_type(tokens), &no_generics());
            assert_eq!(shape.shape, TypeShape::Scalar);
            assert!(!shape.nullable);
        }
    }

    #[test]
    fn option_marks_nullable() {
        let shape = classify_type(&parse_type(quote!(Option<String>)), &no_generics());
        assert_eq!(shape.shape, TypeShape::Scalar);
        assert!(shape.nullable);
    }

    #[test]
    fn vec_of_primitives_is_a_primitive_array() {
        let shape = classify_type(&parse_type(quote!(Vec<u8>)), &no_generics());
        assert_eq!(shape.shape, TypeShape::PrimitiveArray);
    }

    #[test]
    fn vec_of_strings_is_a_reference_array() {
        let shape = classify_type(&parse_type(quote!(Vec<String>)), &no_generics());
        assert_eq!(shape.shape, TypeShape::ReferenceArray);
    }

    #[test]
    fn fixed_arrays_and_slices_are_arrays() {
        let fixed = classify_type(&parse_type(quote!([u8; 16])), &no_generics());
        assert_eq!(fixed.shape, TypeShape::PrimitiveArray);
        let slice = classify_type(&parse_type(quote!(&[String])), &no_generics());
        assert_eq!(slice.shape, TypeShape::ReferenceArray);
    }

    #[test]
    fn bare_type_parameter_is_generic() {
        let generics: syn::Generics = syn::parse2(quote!(<T>)).expect("should parse");
        let shape = classify_type(&parse_type(quote!(T)), &generics);
        assert_eq!(shape.shape, TypeShape::Generic);
    }

    #[test]
    fn optional_vec_is_a_nullable_array() {
        let shape = classify_type(&parse_type(quote!(Option<Vec<u8>>)), &no_generics());
        assert_eq!(shape.shape, TypeShape::PrimitiveArray);
        assert!(shape.nullable);
    }
}
