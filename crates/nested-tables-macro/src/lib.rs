use proc_macro::TokenStream;
use proc_macro2::{Literal, Span, TokenStream as TokenStream2};
use quote::quote;
use syn::parse::{Parse, ParseStream};
use syn::{braced, token, Expr, ExprLit, Ident, Lit, LitInt, LitStr, Result, Token};

use proc_macro_crate::{crate_name, FoundCrate};

/// Key as written in the macro input.
#[derive(Clone)]
enum KeyLit {
    Text(String, Span),
    Int(i64, Span),
}

impl KeyLit {
    fn span(&self) -> Span {
        match self {
            KeyLit::Text(_, span) | KeyLit::Int(_, span) => *span,
        }
    }

    fn describe(&self) -> String {
        match self {
            KeyLit::Text(s, _) => format!("\"{}\"", s),
            KeyLit::Int(n, _) => n.to_string(),
        }
    }
}

impl PartialEq for KeyLit {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (KeyLit::Text(a, _), KeyLit::Text(b, _)) => a == b,
            (KeyLit::Int(a, _), KeyLit::Int(b, _)) => a == b,
            _ => false,
        }
    }
}

enum NodeValue {
    Scalar(Expr),
    Nested(Vec<Node>),
}

struct Node {
    key: KeyLit,
    value: NodeValue,
}

struct NestedInput {
    nodes: Vec<Node>,
}

impl Parse for NestedInput {
    fn parse(input: ParseStream) -> Result<Self> {
        let nodes = parse_nodes(input)?;
        Ok(Self { nodes })
    }
}

fn parse_key(input: ParseStream) -> Result<KeyLit> {
    if input.peek(LitStr) {
        let lit: LitStr = input.parse()?;
        Ok(KeyLit::Text(lit.value(), lit.span()))
    } else if input.peek(LitInt) {
        let lit: LitInt = input.parse()?;
        Ok(KeyLit::Int(lit.base10_parse::<i64>()?, lit.span()))
    } else {
        let ident: Ident = input.parse()?;
        Ok(KeyLit::Text(ident.to_string(), ident.span()))
    }
}

fn parse_nodes(input: ParseStream) -> Result<Vec<Node>> {
    let mut nodes: Vec<Node> = Vec::new();
    while !input.is_empty() {
        let key = parse_key(input)?;

        if let Some(previous) = nodes.iter().find(|n| n.key == key) {
            return Err(syn::Error::new(
                key.span(),
                format!("duplicate key {} at this level", previous.key.describe()),
            ));
        }

        // Children or `=> value;`
        let value = if input.peek(token::Brace) {
            let content;
            braced!(content in input);
            NodeValue::Nested(parse_nodes(&content)?)
        } else {
            input.parse::<Token![=>]>()?;
            let expr: Expr = input.parse()?;
            input.parse::<Token![;]>()?;
            NodeValue::Scalar(expr)
        };

        nodes.push(Node { key, value });
    }
    Ok(nodes)
}

// =============================================================================
// Crate path resolution
// =============================================================================

fn tables_crate_path() -> TokenStream2 {
    match crate_name("nested-tables") {
        Ok(FoundCrate::Itself) => {
            quote!(::nested_tables)
        }
        Ok(FoundCrate::Name(name)) => {
            let ident = Ident::new(&name, Span::call_site());
            quote!(::#ident)
        }
        Err(_) => quote!(::nested_tables),
    }
}

// =============================================================================
// Code generation
// =============================================================================

fn generate_key(key: &KeyLit, ns_crate: &TokenStream2) -> TokenStream2 {
    match key {
        KeyLit::Text(s, span) => {
            let lit = LitStr::new(s, *span);
            quote! { #ns_crate::Key::Text(::std::string::String::from(#lit)) }
        }
        KeyLit::Int(n, _) => {
            let lit = Literal::i64_suffixed(*n);
            quote! { #ns_crate::Key::Int(#lit) }
        }
    }
}

/// Integer and float literals get a fixed type; `_` means no value.
fn generate_scalar(expr: &Expr, ns_crate: &TokenStream2) -> TokenStream2 {
    match expr {
        Expr::Lit(ExprLit {
            lit: Lit::Int(int), ..
        }) => match int.base10_parse::<i64>() {
            Ok(n) => {
                let lit = Literal::i64_suffixed(n);
                quote! { #ns_crate::Scalar::Int(#lit) }
            }
            Err(e) => e.to_compile_error(),
        },
        Expr::Lit(ExprLit {
            lit: Lit::Float(float),
            ..
        }) => match float.base10_parse::<f64>() {
            Ok(x) => {
                let lit = Literal::f64_suffixed(x);
                quote! { #ns_crate::Scalar::Float(#lit) }
            }
            Err(e) => e.to_compile_error(),
        },
        Expr::Infer(_) => quote! { #ns_crate::Scalar::Absent },
        other => quote! { #ns_crate::Scalar::from(#other) },
    }
}

fn generate_data(nodes: &[Node], ns_crate: &TokenStream2) -> TokenStream2 {
    let entries = nodes.iter().map(|node| {
        let key = generate_key(&node.key, ns_crate);
        let value = match &node.value {
            NodeValue::Scalar(expr) => {
                let scalar = generate_scalar(expr, ns_crate);
                quote! { #ns_crate::Value::Scalar(#scalar) }
            }
            NodeValue::Nested(children) => {
                let data = generate_data(children, ns_crate);
                quote! { #ns_crate::Value::Nested(#data) }
            }
        };
        quote! { (#key, #value) }
    });

    quote! {
        #ns_crate::Data::from_entries_unchecked(::std::vec![#(#entries),*])
    }
}

// =============================================================================
// Entry point
// =============================================================================

/// Build a `nested_tables::Data` from a literal tree.
///
/// ```ignore
/// let data = nested! {
///     "1901" {
///         "men" => 50;
///         "women" => 30;
///     }
///     "1902" {
///         "men" => 80;
///         "women" => _;      // no value
///     }
///     total => 160;          // identifiers are text keys
///     1903 => 0;             // integer keys
/// };
/// ```
///
/// Duplicate keys within one level are rejected at compile time.
#[proc_macro]
pub fn nested(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as NestedInput);
    let ns_crate = tables_crate_path();
    generate_data(&input.nodes, &ns_crate).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expand(src: &str) -> Result<String> {
        let input: NestedInput = syn::parse_str(src)?;
        let ns_crate = quote!(::nested_tables);
        Ok(generate_data(&input.nodes, &ns_crate).to_string())
    }

    #[test]
    fn nested_entries_keep_order() {
        let code = expand(r#""b" { "x" => 1; } "a" => 2;"#).unwrap();
        let b = code.find("\"b\"").unwrap();
        let a = code.find("\"a\"").unwrap();
        assert!(b < a);
        assert!(code.contains("Value :: Nested"));
        assert!(code.contains("Value :: Scalar"));
    }

    #[test]
    fn literals_are_typed() {
        let code = expand("1901 => 50; f => 1.5; g => _;").unwrap();
        assert!(code.contains("Key :: Int (1901i64)"));
        assert!(code.contains("Scalar :: Int (50i64)"));
        assert!(code.contains("Scalar :: Float (1.5f64)"));
        assert!(code.contains("Scalar :: Absent"));
    }

    #[test]
    fn expressions_go_through_from() {
        let code = expand(r#"a => some_value(); b => "text";"#).unwrap();
        assert!(code.contains("Scalar :: from (some_value ())"));
        assert!(code.contains("Scalar :: from (\"text\")"));
    }

    #[test]
    fn duplicate_keys_are_rejected() {
        let err = expand(r#""a" => 1; "a" => 2;"#).err().unwrap();
        assert!(err.to_string().contains("duplicate key \"a\""));
    }

    #[test]
    fn same_key_under_different_parents_is_fine() {
        assert!(expand(r#"a { x => 1; } b { x => 2; }"#).is_ok());
    }

    #[test]
    fn text_and_int_keys_do_not_collide() {
        assert!(expand(r#""1" => 1; 1 => 2;"#).is_ok());
    }

    #[test]
    fn missing_semicolon_is_an_error() {
        assert!(expand("a => 1 b => 2;").is_err());
    }
}
