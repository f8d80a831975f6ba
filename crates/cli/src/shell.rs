//! Interactive menu over a `RingBuffer<i64>`.
//!
//! Input is read as whitespace-separated tokens, so a choice and its argument
//! may share a line (`1 42`) or arrive on separate lines.

use circular_buffer_core::buffer::{RingBuffer, RingBufferError};
use circular_buffer_core::config::ShellConfig;
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use tracing::{debug, info};

const RULE: &str = "----------------------------";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MenuChoice {
    Add,
    Remove,
    Display,
    ViewFront,
    End,
}

impl MenuChoice {
    fn parse(token: &str) -> Option<Self> {
        match token.parse::<i64>().ok()? {
            1 => Some(Self::Add),
            2 => Some(Self::Remove),
            3 => Some(Self::Display),
            4 => Some(Self::ViewFront),
            0 => Some(Self::End),
            _ => None,
        }
    }
}

pub struct Shell<R, W> {
    input: R,
    output: W,
    pending: VecDeque<String>,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            pending: VecDeque::new(),
        }
    }

    /// Runs until the user picks `0` or input is exhausted.
    pub fn run(&mut self, config: &ShellConfig) -> io::Result<()> {
        let Some(mut buffer) = self.open_buffer(config)? else {
            info!("input closed before a capacity was given");
            return Ok(());
        };
        info!(capacity = buffer.capacity(), "shell started");

        loop {
            self.print_menu()?;
            let Some(token) = self.next_token()? else {
                break;
            };
            writeln!(self.output, "{RULE}")?;

            match MenuChoice::parse(&token) {
                Some(MenuChoice::Add) => {
                    let Some(arg) = self.next_token()? else {
                        break;
                    };
                    match arg.parse::<i64>() {
                        Ok(value) => {
                            if let Some(dropped) = buffer.push(value) {
                                debug!(dropped, "oldest element overwritten");
                            }
                        }
                        Err(_) => writeln!(self.output, "Invalid element: {arg}")?,
                    }
                }
                Some(MenuChoice::Remove) => match buffer.pop() {
                    Ok(value) => writeln!(self.output, "Removed element: {value}")?,
                    Err(e) => self.report(e)?,
                },
                Some(MenuChoice::Display) => self.display(&buffer)?,
                Some(MenuChoice::ViewFront) => match buffer.front() {
                    Ok(value) => writeln!(self.output, "Last element: {value}")?,
                    Err(e) => self.report(e)?,
                },
                Some(MenuChoice::End) => break,
                None => writeln!(self.output, "Please choose again")?,
            }
        }

        info!("shell finished");
        self.output.flush()
    }

    fn open_buffer(&mut self, config: &ShellConfig) -> io::Result<Option<RingBuffer<i64>>> {
        if let Some(capacity) = config.capacity {
            match RingBuffer::new(capacity.get()) {
                Ok(buffer) => return Ok(Some(buffer)),
                Err(e) => self.report(e)?,
            }
        }

        loop {
            write!(self.output, "Please enter buffer capacity: ")?;
            self.output.flush()?;
            let Some(token) = self.next_token()? else {
                return Ok(None);
            };
            match token.parse::<usize>() {
                Ok(n) => match RingBuffer::new(n) {
                    Ok(buffer) => return Ok(Some(buffer)),
                    Err(e) => self.report(e)?,
                },
                Err(_) => writeln!(self.output, "Capacity must be a positive integer.")?,
            }
        }
    }

    fn print_menu(&mut self) -> io::Result<()> {
        writeln!(self.output, "{RULE}")?;
        writeln!(self.output, "1. Add element to buffer")?;
        writeln!(self.output, "2. Remove element from buffer")?;
        writeln!(self.output, "3. Display buffer")?;
        writeln!(self.output, "4. View last element")?;
        writeln!(self.output, "0. End")?;
        write!(self.output, "Please choose option: ")?;
        self.output.flush()
    }

    fn display(&mut self, buffer: &RingBuffer<i64>) -> io::Result<()> {
        if buffer.is_empty() {
            return self.report(RingBufferError::BufferEmpty);
        }
        let rendered: Vec<String> = buffer.snapshot().iter().map(i64::to_string).collect();
        writeln!(self.output, "buffer: {}", rendered.join(" "))?;
        let full = if buffer.is_full() { "Yes" } else { "No" };
        writeln!(self.output, "Is buffer full?: {full}")?;
        writeln!(self.output, "Current size: {} elements", buffer.len())
    }

    fn report(&mut self, err: RingBufferError) -> io::Result<()> {
        debug!(error = %err, "buffer operation rejected");
        match err {
            RingBufferError::BufferEmpty => writeln!(self.output, "Buffer is empty"),
            RingBufferError::InvalidCapacity => {
                writeln!(self.output, "Buffer size must be greater than 0.")
            }
            RingBufferError::CapacityTooLarge { capacity } => {
                writeln!(self.output, "Buffer size {capacity} is too large.")
            }
        }
    }

    fn next_token(&mut self) -> io::Result<Option<String>> {
        while self.pending.is_empty() {
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.pending.extend(line.split_whitespace().map(str::to_owned));
        }
        Ok(self.pending.pop_front())
    }
}
