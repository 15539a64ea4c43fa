mod generate;
mod scan;
mod serve;

pub use generate::run_generate;
pub use scan::run_scan;
pub use serve::run_serve;

use dsg_lib::messages::Notification;
use dsg_lib::{Document, DocumentError, DsgError, NodeId, UiMessage};

/// Make `page` (an id or a name) current; `None` keeps the document's current page.
pub(crate) fn select_page(doc: &mut Document, page: Option<&str>) -> Result<NodeId, DsgError> {
    let Some(wanted) = page else {
        return Ok(doc.current_page().clone());
    };
    let id = doc
        .find_page(wanted)
        .cloned()
        .ok_or_else(|| DocumentError::NodeNotFound(NodeId::new(wanted)))?;
    doc.set_current_page(&id)?;
    Ok(id)
}

/// Notifications among the replies, in order.
pub(crate) fn notifications(replies: Vec<UiMessage>) -> Vec<Notification> {
    replies
        .into_iter()
        .filter_map(|reply| match reply {
            UiMessage::Notify(note) => Some(note),
            UiMessage::GenerationComplete { .. } => None,
        })
        .collect()
}
