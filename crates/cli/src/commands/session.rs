//! Local session inspection and editing.

use serde_json::json;

use crate::cli::SessionAction;
use crate::error::Result;
use crate::output::{OutputFormat, ResultBuilder, SessionView, print_result};
use crate::session_store::SessionStore;

pub fn run(action: SessionAction, store: &mut SessionStore, format: OutputFormat) -> Result<()> {
	match action {
		SessionAction::Show => {
			let result = ResultBuilder::new("session.show").data(SessionView::from(&store.session)).build();
			print_result(&result, format);
		}
		SessionAction::Set(args) => {
			store.apply(args);
			store.save()?;
			let result = ResultBuilder::new("session.set").data(SessionView::from(&store.session)).build();
			print_result(&result, format);
		}
		SessionAction::Clear => {
			let removed = store.clear()?;
			let result = ResultBuilder::new("session.clear").data(json!({ "removed": removed })).build();
			print_result(&result, format);
		}
	}
	Ok(())
}
