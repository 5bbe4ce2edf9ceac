use crate::circular_buffer::CircularQueue;
use crate::item::IdSource;

const RULE: &str = "--------------------------------------------";

/// Text view of the queue: counter line, occupied run oldest to newest,
/// optionally the cursor indices, then a rule line.
pub fn render<G: IdSource>(queue: &CircularQueue<G>, show_indices: bool) -> String {
    let mut out = format!("--- QUEUE STATE (count: {}) ---\n", queue.len());

    if queue.is_empty() {
        out.push_str("| Queue EMPTY |\n");
    } else {
        let run: String = queue.iter().map(|item| format!(" [ID: {:02}] ", item.id)).collect();
        out.push_str(&format!("|{}|\n", run));
        if show_indices {
            out.push_str(&format!("Indices: head={}, tail={}\n", queue.head(), queue.tail()));
        }
    }

    out.push_str(RULE);
    out.push('\n');
    out
}
