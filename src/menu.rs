#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    View,
    Dequeue,
    Enqueue,
    Exit,
}

/// What a line of user input turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Choice(MenuChoice),
    OutOfRange(i64),
    Unparsable,
}

const BAR: &str = "========================================";

/// Menu banner and options, ending in the prompt.
pub fn menu_text(capacity: usize) -> String {
    format!(
        "\n{bar}\n\
         PIECE QUEUE SIMULATOR (SIZE: {capacity})\n\
         {bar}\n\
         1. View queue\n\
         2. Play piece (dequeue)\n\
         3. Insert new piece (enqueue)\n\
         4. Exit\n\
         ----------------------------------------\n\
         Choose an option: ",
        bar = BAR,
        capacity = capacity
    )
}

pub fn parse_selection(line: &str) -> Selection {
    match line.trim().parse::<i64>() {
        Ok(1) => Selection::Choice(MenuChoice::View),
        Ok(2) => Selection::Choice(MenuChoice::Dequeue),
        Ok(3) => Selection::Choice(MenuChoice::Enqueue),
        Ok(4) => Selection::Choice(MenuChoice::Exit),
        Ok(n) => Selection::OutOfRange(n),
        Err(_) => Selection::Unparsable,
    }
}
