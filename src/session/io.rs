//! Raw file-descriptor primitives for the I/O pump.

use std::os::fd::{AsFd, AsRawFd};

use nix::errno::Errno;
use nix::poll::{poll, PollFd, PollFlags, PollTimeout};
use nix::unistd::{read, write};

use crate::error::{Error, Result};

use super::signals;

const BUF_SIZE: usize = 128;

/// Read whatever is available from `fd`.
///
/// Blocks until at least one byte arrives, then drains everything that is
/// immediately readable. A zero-length read means the other side closed
/// the fd; the session cannot make progress on a closed fd, so that is
/// reported as a runtime error.
pub fn read_from_fd<F: AsFd>(fd: &F) -> Result<Vec<u8>> {
    let mut buf = [0u8; BUF_SIZE];
    let mut out = Vec::new();

    while out.is_empty() {
        match read(fd.as_fd().as_raw_fd(), &mut buf) {
            Ok(0) => return Err(eof_error()),
            Ok(count) => out.extend_from_slice(&buf[..count]),
            // Callers poll before reading, so EAGAIN only shows up on a
            // spurious wakeup of a non-blocking fd.
            Err(Errno::EINTR) | Err(Errno::EAGAIN) => {
                signals::check_early_exit()?;
                continue;
            }
            Err(e) => return Err(read_error(e)),
        }

        loop {
            let mut polls = [PollFd::new(fd.as_fd(), PollFlags::POLLIN)];
            match poll(&mut polls, PollTimeout::ZERO) {
                Ok(0) => break,
                Ok(_) => {}
                Err(Errno::EINTR) => {
                    signals::check_early_exit()?;
                    continue;
                }
                Err(e) => {
                    return Err(Error::Runtime(format!(
                        "there was a problem polling fd while draining: {e}"
                    )))
                }
            }
            match read(fd.as_fd().as_raw_fd(), &mut buf) {
                Ok(0) => return Err(eof_error()),
                Ok(count) => out.extend_from_slice(&buf[..count]),
                Err(Errno::EINTR) => continue,
                Err(Errno::EAGAIN) => break,
                Err(e) => return Err(read_error(e)),
            }
        }
    }

    Ok(out)
}

/// Write all of `bytes` to `fd`, retrying short writes.
pub fn write_to_fd<F: AsFd>(fd: &F, bytes: &[u8]) -> Result<()> {
    let mut written = 0;
    while written < bytes.len() {
        match write(fd, &bytes[written..]) {
            Ok(count) => written += count,
            Err(Errno::EINTR) | Err(Errno::EAGAIN) => continue,
            Err(e) => return Err(Error::Runtime(format!("could not write to fd: {e}"))),
        }
    }
    Ok(())
}

/// Normalize line endings for the pty: the line discipline expects `\r`.
pub fn normalize_newlines(bytes: &[u8]) -> Vec<u8> {
    bytes
        .iter()
        .map(|&b| if b == b'\n' { b'\r' } else { b })
        .collect()
}

fn eof_error() -> Error {
    Error::Runtime("end of file while reading fd".into())
}

fn read_error(e: Errno) -> Error {
    Error::Runtime(format!("could not read from fd: {e}"))
}

#[cfg(test)]
mod tests {
    use nix::unistd::pipe;

    use super::*;

    #[test]
    fn test_normalize_newlines() {
        assert_eq!(normalize_newlines(b"a\nb"), b"a\rb");
    }

    #[test]
    fn test_normalize_newlines_preserves_length() {
        let input = b"one\ntwo\nthree";
        assert_eq!(normalize_newlines(input).len(), input.len());
    }

    #[test]
    fn test_normalize_newlines_is_idempotent() {
        let once = normalize_newlines(b"a\nb\nc");
        let twice = normalize_newlines(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_normalize_newlines_empty() {
        assert_eq!(normalize_newlines(b""), Vec::<u8>::new());
    }

    #[test]
    fn test_pipe_round_trip() {
        let (reader, writer) = pipe().unwrap();
        write_to_fd(&writer, b"hello").unwrap();
        assert_eq!(read_from_fd(&reader).unwrap(), b"hello");
    }

    #[test]
    fn test_read_drains_everything_available() {
        let (reader, writer) = pipe().unwrap();
        write_to_fd(&writer, b"abc").unwrap();
        write_to_fd(&writer, b"def").unwrap();
        assert_eq!(read_from_fd(&reader).unwrap(), b"abcdef");
    }

    #[test]
    fn test_read_drains_more_than_one_buffer() {
        let (reader, writer) = pipe().unwrap();
        let payload = vec![b'x'; 500];
        write_to_fd(&writer, &payload).unwrap();
        assert_eq!(read_from_fd(&reader).unwrap(), payload);
    }

    #[test]
    fn test_read_end_of_file_is_an_error() {
        let (reader, writer) = pipe().unwrap();
        drop(writer);
        assert!(read_from_fd(&reader).is_err());
    }
}
