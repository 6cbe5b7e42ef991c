//! Procedural macros for the aoc-solver library

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Attribute, DeriveInput, Expr, ExprArray, Lit, LitInt, parse_macro_input};

/// Derive macro implementing `Solver` on top of `PartSolver<N>` impls
///
/// # Attributes
///
/// - `max_parts`: Required. Number of parts; `PartSolver<1>` through
///   `PartSolver<max_parts>` must all be implemented.
///
/// The generated `solve_part` dispatches part `N` to `PartSolver<N>::solve`
/// and answers any other part with `SolveError::PartNotImplemented`.
///
/// # Example
///
/// ```ignore
/// #[derive(AocSolver)]
/// #[aoc_solver(max_parts = 2)]
/// struct Day7;
///
/// impl AocParser for Day7 { /* ... */ }
/// impl PartSolver<1> for Day7 { /* ... */ }
/// impl PartSolver<2> for Day7 { /* ... */ }
/// ```
#[proc_macro_derive(AocSolver, attributes(aoc_solver))]
pub fn derive_aoc_solver(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_aoc_solver(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// Derive macro for automatically registering solvers with the plugin system
///
/// # Attributes
///
/// - `year`: Required. The Advent of Code year (e.g., 2018)
/// - `day`: Required. The day number (1-25)
/// - `tags`: Optional. Array of string literals for filtering (e.g., ["graph", "parsing"])
///
/// # Requirements
///
/// The type must be a unit struct implementing the `Solver` trait. If the
/// trait is not implemented you get a compile-time error pointing at the type:
///
/// ```text
/// error[E0277]: the trait bound `YourSolver: Solver` is not satisfied
/// ```
///
/// # Example
///
/// ```ignore
/// #[derive(AocSolver, AutoRegisterSolver)]
/// #[aoc_solver(max_parts = 2)]
/// #[aoc(year = 2018, day = 7, tags = ["graph", "scheduling"])]
/// pub struct Solver;
/// ```
#[proc_macro_derive(AutoRegisterSolver, attributes(aoc))]
pub fn derive_auto_register_solver(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_auto_register(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn find_attr<'a>(input: &'a DeriveInput, name: &str) -> syn::Result<&'a Attribute> {
    input
        .attrs
        .iter()
        .find(|attr| attr.path().is_ident(name))
        .ok_or_else(|| {
            syn::Error::new_spanned(
                &input.ident,
                format!("missing #[{}(...)] attribute", name),
            )
        })
}

fn expand_aoc_solver(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let attr = find_attr(input, "aoc_solver")?;

    let mut max_parts: Option<u8> = None;
    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("max_parts") {
            let lit: LitInt = meta.value()?.parse()?;
            max_parts = Some(lit.base10_parse()?);
            Ok(())
        } else {
            Err(meta.error("unsupported attribute; expected `max_parts`"))
        }
    })?;

    let max_parts = max_parts.ok_or_else(|| syn::Error::new_spanned(attr, "missing `max_parts`"))?;
    if max_parts == 0 {
        return Err(syn::Error::new_spanned(
            attr,
            "`max_parts` must be at least 1",
        ));
    }

    let arms = (1..=max_parts).map(|part| {
        quote! {
            #part => <Self as ::aoc_solver::PartSolver<#part>>::solve(shared),
        }
    });

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::aoc_solver::Solver for #name #ty_generics #where_clause {
            const PARTS: u8 = #max_parts;

            fn solve_part(
                shared: &mut <Self as ::aoc_solver::AocParser>::SharedData<'_>,
                part: u8,
            ) -> ::core::result::Result<::std::string::String, ::aoc_solver::SolveError> {
                match part {
                    #(#arms)*
                    _ => ::core::result::Result::Err(
                        ::aoc_solver::SolveError::PartNotImplemented(part),
                    ),
                }
            }
        }
    })
}

fn expand_auto_register(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let attr = find_attr(input, "aoc")?;

    let mut year: Option<u16> = None;
    let mut day: Option<u8> = None;
    let mut tags: Vec<String> = Vec::new();

    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("year") {
            let lit: LitInt = meta.value()?.parse()?;
            year = Some(lit.base10_parse()?);
        } else if meta.path.is_ident("day") {
            let lit: LitInt = meta.value()?.parse()?;
            day = Some(lit.base10_parse()?);
        } else if meta.path.is_ident("tags") {
            let array: ExprArray = meta.value()?.parse()?;
            for elem in &array.elems {
                match elem {
                    Expr::Lit(expr) => match &expr.lit {
                        Lit::Str(tag) => tags.push(tag.value()),
                        other => return Err(syn::Error::new_spanned(other, "tags must be strings")),
                    },
                    other => return Err(syn::Error::new_spanned(other, "tags must be strings")),
                }
            }
        } else {
            return Err(meta.error("unsupported attribute; expected `year`, `day` or `tags`"));
        }
        Ok(())
    })?;

    let year = year.ok_or_else(|| syn::Error::new_spanned(attr, "missing required `year`"))?;
    let day = day.ok_or_else(|| syn::Error::new_spanned(attr, "missing required `day`"))?;
    if !(1..=25).contains(&day) {
        return Err(syn::Error::new_spanned(attr, "`day` must be between 1 and 25"));
    }

    Ok(quote! {
        // Compile-time check that the type implements Solver
        const _: () = {
            trait MustImplementSolver: ::aoc_solver::Solver {}
            impl MustImplementSolver for #name {}
        };

        ::aoc_solver::inventory::submit! {
            ::aoc_solver::SolverPlugin {
                year: #year,
                day: #day,
                solver: &#name,
                tags: &[#(#tags),*],
            }
        }
    })
}
