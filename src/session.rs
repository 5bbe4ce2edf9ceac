use crate::circular_buffer::CircularQueue;
use crate::item::IdSource;
use crate::menu::{menu_text, parse_selection, MenuChoice, Selection};
use crate::render::render;
use log::{info, warn};
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

const FAREWELL: &str = "\nEnding the simulation. See you soon!\n";

/// Result of handling one selection: the text to print and whether the
/// loop should keep reading.
#[derive(Debug, PartialEq, Eq)]
pub struct Outcome {
    pub text: String,
    pub keep_going: bool,
}

impl Outcome {
    fn next(text: String) -> Self {
        Self { text, keep_going: true }
    }
}

/// Drives one queue through the interactive menu.
pub struct Session<G: IdSource> {
    queue: CircularQueue<G>,
    show_indices: bool,
}

impl<G: IdSource> Session<G> {
    pub fn new(queue: CircularQueue<G>, show_indices: bool) -> Self {
        Self { queue, show_indices }
    }

    pub fn queue(&self) -> &CircularQueue<G> {
        &self.queue
    }

    fn view(&self) -> String {
        render(&self.queue, self.show_indices)
    }

    pub fn greeting(&self) -> String {
        format!(
            "Initializing the queue with {} pieces automatically...\n\
             Initialization complete. Initial state:\n\n{}",
            self.queue.capacity(),
            self.view()
        )
    }

    pub fn handle(&mut self, selection: Selection) -> Outcome {
        let choice = match selection {
            Selection::Choice(choice) => choice,
            Selection::OutOfRange(n) => {
                warn!("Menu option {} out of range", n);
                return Outcome::next("\nInvalid option. Try again.\n".to_string());
            }
            Selection::Unparsable => {
                warn!("Discarding unparsable menu input");
                return Outcome::next("\nInvalid input. Please enter a number from 1 to 4.\n".to_string());
            }
        };

        match choice {
            MenuChoice::View => Outcome::next(format!("\n{}", self.view())),
            MenuChoice::Dequeue => match self.queue.dequeue() {
                Ok(item) => Outcome::next(format!(
                    "\nPlaying (removing) the piece at the front. Removed ID: {}\n\
                     Piece played successfully.\n\n{}",
                    item.id,
                    self.view()
                )),
                Err(e) => {
                    warn!("Dequeue rejected: {}", e);
                    Outcome::next(format!("\nERROR: {}. There is no piece to play.\n", e))
                }
            },
            MenuChoice::Enqueue => match self.queue.enqueue() {
                Ok(id) => Outcome::next(format!(
                    "\nInserting new piece with ID: {} at the end of the queue...\n\
                     Insertion successful.\n\n{}",
                    id,
                    self.view()
                )),
                Err(e) => {
                    warn!("Enqueue rejected: {}", e);
                    Outcome::next(format!("\nERROR: {}. No piece can be inserted.\n", e))
                }
            },
            MenuChoice::Exit => Outcome {
                text: FAREWELL.to_string(),
                keep_going: false,
            },
        }
    }

    /// Run the menu loop until the user exits or `input` is exhausted.
    pub async fn run<R, W>(&mut self, mut input: R, output: &mut W) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!("Session started with capacity {}", self.queue.capacity());
        output.write_all(self.greeting().as_bytes()).await?;

        let menu = menu_text(self.queue.capacity());
        let mut line = Vec::new();
        loop {
            output.write_all(menu.as_bytes()).await?;
            output.flush().await?;

            line.clear();
            if input.read_until(b'\n', &mut line).await? == 0 {
                info!("Input closed, ending session");
                output.write_all(FAREWELL.as_bytes()).await?;
                break;
            }

            // Bytes that are not UTF-8 never parse as a number, so they end
            // up as unparsable input.
            let outcome = self.handle(parse_selection(&String::from_utf8_lossy(&line)));
            output.write_all(outcome.text.as_bytes()).await?;
            if !outcome.keep_going {
                break;
            }
        }

        output.flush().await?;
        info!("Session ended with queue {:?}", self.queue.snapshot());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::SequentialIds;
    use std::num::NonZeroUsize;

    fn session(capacity: usize) -> Session<SequentialIds> {
        let queue = CircularQueue::initialize(NonZeroUsize::new(capacity).unwrap(), SequentialIds::new()).unwrap();
        Session::new(queue, true)
    }

    async fn transcript(session: &mut Session<SequentialIds>, input: &[u8]) -> String {
        let mut out = Vec::new();
        session.run(input, &mut out).await.unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_handle_enqueue_on_full() {
        let mut s = session(5);
        let out = s.handle(Selection::Choice(MenuChoice::Enqueue));
        assert!(out.keep_going);
        assert_eq!(out.text, "\nERROR: the queue is full. No piece can be inserted.\n");
        assert_eq!(s.queue().snapshot(), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_handle_dequeue_then_enqueue() {
        let mut s = session(5);
        let out = s.handle(Selection::Choice(MenuChoice::Dequeue));
        assert!(out.text.contains("Removed ID: 1\n"));
        assert!(out.text.contains("| [ID: 02]  [ID: 03]  [ID: 04]  [ID: 05] |"));

        let out = s.handle(Selection::Choice(MenuChoice::Enqueue));
        assert!(out.text.contains("new piece with ID: 6 "));
        assert!(out.text.contains("Indices: head=1, tail=1"));
        assert_eq!(s.queue().snapshot(), vec![2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_handle_dequeue_on_empty() {
        let mut s = session(1);
        s.handle(Selection::Choice(MenuChoice::Dequeue));
        let out = s.handle(Selection::Choice(MenuChoice::Dequeue));
        assert_eq!(out.text, "\nERROR: the queue is empty. There is no piece to play.\n");
        assert!(s.queue().is_empty());
    }

    #[test]
    fn test_handle_bad_input_is_a_no_op() {
        let mut s = session(2);
        let out = s.handle(Selection::Unparsable);
        assert!(out.keep_going);
        assert!(out.text.contains("Invalid input"));
        let out = s.handle(Selection::OutOfRange(9));
        assert!(out.keep_going);
        assert!(out.text.contains("Invalid option"));
        assert_eq!(s.queue().snapshot(), vec![1, 2]);
    }

    #[test]
    fn test_handle_exit() {
        let mut s = session(2);
        let out = s.handle(Selection::Choice(MenuChoice::Exit));
        assert!(!out.keep_going);
        assert_eq!(out.text, FAREWELL);
    }

    #[tokio::test]
    async fn test_run_until_exit() {
        let mut s = session(5);
        let out = transcript(&mut s, b"2\nx\n3\n1\n4\n3\n").await;

        assert!(out.starts_with("Initializing the queue with 5 pieces automatically...\n"));
        assert!(out.contains("Removed ID: 1"));
        assert!(out.contains("Invalid input"));
        assert!(out.contains("ID: 6"));
        assert!(out.ends_with(FAREWELL));
        // greeting plus one prompt per line read up to and including the exit
        assert_eq!(out.matches("Choose an option: ").count(), 5);
        // the trailing "3" after exit is never read
        assert_eq!(s.queue().snapshot(), vec![2, 3, 4, 5, 6]);
    }

    #[tokio::test]
    async fn test_run_stops_at_end_of_input() {
        let mut s = session(3);
        let out = transcript(&mut s, b"2\n2").await;
        assert_eq!(out.matches("Choose an option: ").count(), 3);
        assert!(out.ends_with(FAREWELL));
        assert_eq!(s.queue().snapshot(), vec![3]);
    }

    #[tokio::test]
    async fn test_run_survives_invalid_utf8() {
        let mut s = session(5);
        let out = transcript(&mut s, b"\xff\xfe\n2\n4\n").await;
        assert!(out.contains("Invalid input. Please enter a number from 1 to 4."));
        assert!(out.contains("Removed ID: 1"));
        assert!(out.ends_with(FAREWELL));
        assert_eq!(s.queue().snapshot(), vec![2, 3, 4, 5]);
    }

    #[tokio::test]
    async fn test_run_menu_shows_capacity() {
        let mut s = session(3);
        let out = transcript(&mut s, b"4\n").await;
        assert!(out.contains("PIECE QUEUE SIMULATOR (SIZE: 3)"));
    }
}
