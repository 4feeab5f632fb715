use std::collections::HashSet;

use proc_macro::TokenStream;
use quote::quote;
use syn::parse::{Parse, ParseStream};
use syn::{Error, Ident, LitStr, Path, Result, Token, braced, bracketed, parse_macro_input};

struct CatalogInput {
	entries: Vec<CommandEntry>,
}

impl Parse for CatalogInput {
	fn parse(input: ParseStream<'_>) -> Result<Self> {
		let mut entries = None;

		while !input.is_empty() {
			let key: Ident = input.parse()?;
			input.parse::<Token![:]>()?;

			match key.to_string().as_str() {
				"commands" => {
					if entries.is_some() {
						return Err(Error::new(key.span(), "duplicate 'commands' section"));
					}

					let content;
					bracketed!(content in input);
					let parsed = content.parse_terminated(CommandEntry::parse, Token![,])?.into_iter().collect::<Vec<_>>();
					entries = Some(parsed);
				}
				other => {
					return Err(Error::new(key.span(), format!("unsupported top-level key '{other}', expected 'commands'")));
				}
			}

			if input.peek(Token![,]) {
				input.parse::<Token![,]>()?;
			}
		}

		let entries = entries.ok_or_else(|| Error::new(proc_macro2::Span::call_site(), "missing required 'commands' section"))?;

		if entries.is_empty() {
			return Err(Error::new(proc_macro2::Span::call_site(), "'commands' section must not be empty"));
		}

		let mut seen = HashSet::new();
		for name in entries.iter().flat_map(|entry| entry.names.iter()) {
			if !seen.insert(name.value()) {
				return Err(Error::new(name.span(), format!("command name '{}' is registered twice", name.value())));
			}
		}

		Ok(Self { entries })
	}
}

struct CommandEntry {
	id: Ident,
	handler: Path,
	names: Vec<LitStr>,
	summary: Option<LitStr>,
}

impl Parse for CommandEntry {
	fn parse(input: ParseStream<'_>) -> Result<Self> {
		let id: Ident = input.parse()?;
		input.parse::<Token![=>]>()?;
		let handler: Path = input.parse()?;

		let content;
		braced!(content in input);

		let mut names: Option<Vec<LitStr>> = None;
		let mut summary: Option<LitStr> = None;

		while !content.is_empty() {
			let key: Ident = content.parse()?;
			content.parse::<Token![:]>()?;

			match key.to_string().as_str() {
				"names" => {
					let names_content;
					bracketed!(names_content in content);
					let parsed = names_content
						.parse_terminated(|input: ParseStream<'_>| input.parse(), Token![,])?
						.into_iter()
						.collect::<Vec<_>>();
					if parsed.is_empty() {
						return Err(Error::new(key.span(), "'names' must include at least one command name"));
					}
					names = Some(parsed);
				}
				"summary" => {
					summary = Some(content.parse()?);
				}
				other => {
					return Err(Error::new(key.span(), format!("unsupported command field '{other}', expected names/summary")));
				}
			}

			if content.peek(Token![,]) {
				content.parse::<Token![,]>()?;
			}
		}

		let names = names.ok_or_else(|| Error::new(id.span(), "missing required field 'names'"))?;

		Ok(Self {
			id,
			handler,
			names,
			summary,
		})
	}
}

/// Generates the command registry.
///
/// ```ignore
/// command_catalog! {
///     commands: [
///         CreateUser => handlers::create_user { names: ["create-user", "newuser"], summary: "..." },
///     ],
/// }
/// ```
///
/// Emits `CommandId`, `lookup_command`, `command_name`, `command_aliases`,
/// `command_summary` and `run_handler`. The first name of each entry is its
/// canonical name; handlers must be `async fn(&mut RequestContext<'_>) ->
/// pro_runtime::Result<Response>`.
#[proc_macro]
pub fn command_catalog(input: TokenStream) -> TokenStream {
	let catalog = parse_macro_input!(input as CatalogInput);

	let ids = catalog.entries.iter().map(|entry| &entry.id).collect::<Vec<_>>();

	let lookup_arms = catalog.entries.iter().map(|entry| {
		let id = &entry.id;
		let names = &entry.names;
		quote! {
			#(#names)|* => Some(CommandId::#id),
		}
	});

	let name_arms = catalog.entries.iter().map(|entry| {
		let id = &entry.id;
		let primary = &entry.names[0];
		quote! {
			CommandId::#id => #primary,
		}
	});

	let alias_arms = catalog.entries.iter().map(|entry| {
		let id = &entry.id;
		let aliases = &entry.names[1..];
		quote! {
			CommandId::#id => &[#(#aliases),*],
		}
	});

	let summary_arms = catalog.entries.iter().map(|entry| {
		let id = &entry.id;
		let summary = entry.summary.as_ref().map(LitStr::value).unwrap_or_default();
		quote! {
			CommandId::#id => #summary,
		}
	});

	let run_arms = catalog.entries.iter().map(|entry| {
		let id = &entry.id;
		let handler = &entry.handler;
		quote! {
			CommandId::#id => #handler(req).await,
		}
	});

	TokenStream::from(quote! {
		#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
		pub enum CommandId {
			#(#ids),*
		}

		impl CommandId {
			/// Every registered command, in catalog order.
			pub const ALL: &'static [CommandId] = &[#(CommandId::#ids),*];
		}

		pub fn lookup_command(name: &str) -> Option<CommandId> {
			match name {
				#(#lookup_arms)*
				_ => None,
			}
		}

		pub fn command_name(id: CommandId) -> &'static str {
			match id {
				#(#name_arms)*
			}
		}

		pub fn command_aliases(id: CommandId) -> &'static [&'static str] {
			match id {
				#(#alias_arms)*
			}
		}

		pub fn command_summary(id: CommandId) -> &'static str {
			match id {
				#(#summary_arms)*
			}
		}

		pub async fn run_handler(
			id: CommandId,
			req: &mut crate::context::RequestContext<'_>,
		) -> pro_runtime::Result<pro_protocol::Response> {
			match id {
				#(#run_arms)*
			}
		}
	})
}
