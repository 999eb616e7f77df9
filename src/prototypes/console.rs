/*
 * ==========================================================================
 * BRISK - A small imperative scripting language
 * ==========================================================================
 *
 * Author:   Sam Wilcox
 *
 * License:
 * This file is part of the BRISK programming language project.
 *
 * BRISK is dual-licensed under the terms of:
 *   - The MIT license
 *   - The Apache License, Version 2.0
 *
 * You may choose either license to govern your use of this software.
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under these licenses is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *
 * ==========================================================================
 */

use std::fmt;
use std::io::{self, Write};

/// Output built-ins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleFn {
    /// Arguments joined by spaces, then a newline.
    Print,
    /// Like `print`, followed by a blank line.
    Println,
}

impl ConsoleFn {
    pub fn name(self) -> &'static str {
        match self {
            ConsoleFn::Print => "print",
            ConsoleFn::Println => "println",
        }
    }

    /// The exact text written for these displayed arguments.
    pub fn render(self, parts: &[String]) -> String {
        let mut line = parts.join(" ");
        line.push('\n');
        if self == ConsoleFn::Println {
            line.push('\n');
        }
        line
    }
}

/// Where `print` and `println` write.
///
/// Every line goes to the output sink and, unless disabled, is mirrored as
/// an `info` event on the `brisk::console` target.
pub struct Console {
    out: Box<dyn Write>,
    mirror_to_log: bool,
}

impl Console {
    pub fn new(out: Box<dyn Write>, mirror_to_log: bool) -> Self {
        Self { out, mirror_to_log }
    }

    /// Console on the process's standard output.
    pub fn stdout(mirror_to_log: bool) -> Self {
        Self::new(Box::new(io::stdout()), mirror_to_log)
    }

    pub fn set_mirroring(&mut self, mirror_to_log: bool) {
        self.mirror_to_log = mirror_to_log;
    }

    /// Writes one call's output.
    ///
    /// A failing sink does not abort the program; the failure is logged.
    pub fn write(&mut self, fun: ConsoleFn, parts: &[String]) {
        let text = fun.render(parts);

        if self.mirror_to_log {
            tracing::info!(target: "brisk::console", "{}", text.trim_end_matches('\n'));
        }

        if let Err(err) = self.out.write_all(text.as_bytes()).and_then(|()| self.out.flush()) {
            tracing::warn!(error = %err, "console write failed");
        }
    }
}

impl fmt::Debug for Console {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Console")
            .field("mirror_to_log", &self.mirror_to_log)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct Sink(Rc<RefCell<Vec<u8>>>);

    impl Write for Sink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn print_joins_with_spaces() {
        let parts = vec!["a".to_string(), "1".to_string()];
        assert_eq!(ConsoleFn::Print.render(&parts), "a 1\n");
        assert_eq!(ConsoleFn::Println.render(&parts), "a 1\n\n");
        assert_eq!(ConsoleFn::Print.render(&[]), "\n");
    }

    #[test]
    fn writes_reach_the_sink() {
        let sink = Sink::default();
        let mut console = Console::new(Box::new(sink.clone()), false);

        console.write(ConsoleFn::Print, &["hi".to_string()]);
        console.write(ConsoleFn::Println, &["there".to_string()]);

        assert_eq!(
            String::from_utf8(sink.0.borrow().clone()).unwrap(),
            "hi\nthere\n\n"
        );
    }
}
