/// Terminal I/O port: the two capabilities the game core consumes.
///
/// The core never touches the terminal directly. It polls a `KeySource`
/// and hands finished frames to a `FrameSink`; the crossterm adapters in
/// `input` and `renderer` are the production implementations.

pub mod input;
pub mod renderer;
pub mod sound;

use std::io;

use renderer::Frame;

/// Non-blocking single-key poll.
pub trait KeySource {
    /// The next pressed character, or None if no key is waiting.
    /// Device failures also read as None.
    fn poll_key(&mut self) -> Option<char>;
}

/// Full-frame output. Every call replaces whatever was on screen.
pub trait FrameSink {
    fn write_frame(&mut self, frame: &Frame) -> io::Result<()>;
}

impl<T: KeySource + ?Sized> KeySource for &mut T {
    fn poll_key(&mut self) -> Option<char> {
        (**self).poll_key()
    }
}

impl<T: FrameSink + ?Sized> FrameSink for &mut T {
    fn write_frame(&mut self, frame: &Frame) -> io::Result<()> {
        (**self).write_frame(frame)
    }
}
