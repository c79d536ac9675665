//! Linux entropy through the `getrandom(2)` system call.

use libc::{EINTR, c_void, getrandom};

use crate::error::{Error, Result};

/// Fills `buf` with bytes from the kernel entropy pool.
///
/// Short reads and `EINTR` are retried until the whole buffer is
/// written. Any other failure is reported as
/// [`Error::EntropyUnavailable`]; the buffer content is then unspecified.
pub(crate) fn sys_random(buf: &mut [u8]) -> Result<()> {
    let mut filled = 0;

    while filled < buf.len() {
        let rest = &mut buf[filled..];
        let ret = unsafe { getrandom(rest.as_mut_ptr() as *mut c_void, rest.len(), 0) };

        if ret < 0 {
            if std::io::Error::last_os_error().raw_os_error() == Some(EINTR) {
                continue;
            }

            return Err(Error::EntropyUnavailable);
        }

        filled += ret as usize;
    }

    Ok(())
}
