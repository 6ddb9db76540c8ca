use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::os::windows::io::FromRawHandle;

use serde::Serialize;
use winrelay_core::WindowResult;
use winrelay_core::ipc::{Command, PIPE_NAME, Response};
use windows::Win32::Foundation::{
    CloseHandle, DUPLICATE_SAME_ACCESS, DuplicateHandle, ERROR_PIPE_CONNECTED, HANDLE,
    INVALID_HANDLE_VALUE,
};
use windows::Win32::Storage::FileSystem::{
    CreateFileW, FILE_SHARE_NONE, FlushFileBuffers, OPEN_EXISTING, PIPE_ACCESS_DUPLEX,
};
use windows::Win32::System::Pipes::{
    ConnectNamedPipe, CreateNamedPipeW, DisconnectNamedPipe, PIPE_READMODE_BYTE, PIPE_TYPE_BYTE,
    PIPE_UNLIMITED_INSTANCES, PIPE_WAIT, WaitNamedPipeW,
};
use windows::Win32::System::Threading::GetCurrentProcess;
use windows::core::HSTRING;

const GENERIC_READ_WRITE: u32 = 0x80000000 | 0x40000000;

/// Pipe buffer size. Relayed payloads are small JSON objects.
const BUFFER_SIZE: u32 = 4096;

/// A Named Pipe server the host uses to accept requests.
///
/// Clients are the CLI or the launcher relaying messages from the
/// application. Each connection carries one request line and gets one
/// response line back.
pub struct PipeServer {
    handle: HANDLE,
}

impl PipeServer {
    /// Creates a new pipe instance without waiting for a client.
    pub fn create() -> WindowResult<Self> {
        let pipe_name = HSTRING::from(PIPE_NAME);

        // SAFETY: CreateNamedPipeW creates a new named pipe instance.
        // We pass valid parameters and check for INVALID_HANDLE_VALUE.
        let handle = unsafe {
            CreateNamedPipeW(
                &pipe_name,
                PIPE_ACCESS_DUPLEX,
                PIPE_TYPE_BYTE | PIPE_READMODE_BYTE | PIPE_WAIT,
                PIPE_UNLIMITED_INSTANCES,
                BUFFER_SIZE,
                BUFFER_SIZE,
                0, // default timeout
                None,
            )
        };

        if handle == INVALID_HANDLE_VALUE {
            return Err("Failed to create named pipe".into());
        }

        Ok(Self { handle })
    }

    /// Blocks until a client connects and returns its request line.
    ///
    /// The line is returned unparsed so a malformed request can still be
    /// answered with an error response on the same connection.
    pub fn accept_line(&self) -> WindowResult<String> {
        // SAFETY: ConnectNamedPipe blocks until a client connects.
        // ERROR_PIPE_CONNECTED means the client connected between
        // CreateNamedPipeW and this call, which is a success.
        if let Err(e) = unsafe { ConnectNamedPipe(self.handle, None) }
            && e.code() != ERROR_PIPE_CONNECTED.to_hresult()
        {
            return Err(e.into());
        }

        read_line(self.handle)
    }

    /// Sends a response to the connected client and disconnects it.
    pub fn respond(&self, response: &Response) -> WindowResult<()> {
        write_json_line(self.handle, response)?;

        // SAFETY: FlushFileBuffers blocks until the client has read all
        // data from the pipe; DisconnectNamedPipe would otherwise drop it.
        unsafe {
            let _ = FlushFileBuffers(self.handle);
            DisconnectNamedPipe(self.handle)?;
        }

        Ok(())
    }
}

impl Drop for PipeServer {
    fn drop(&mut self) {
        // SAFETY: the server owns the pipe handle exclusively.
        unsafe {
            let _ = CloseHandle(self.handle);
        }
    }
}

/// Closes a client-side HANDLE on drop, including on error paths.
struct HandleGuard(HANDLE);

impl Drop for HandleGuard {
    fn drop(&mut self) {
        // SAFETY: the guard owns this handle exclusively.
        unsafe {
            let _ = CloseHandle(self.0);
        }
    }
}

/// Sends one request to the host and waits for its response.
pub fn send_command(command: &Command) -> WindowResult<Response> {
    let pipe_name = HSTRING::from(PIPE_NAME);

    // SAFETY: CreateFileW opens an existing named pipe as a client.
    let handle = unsafe {
        CreateFileW(
            &pipe_name,
            GENERIC_READ_WRITE,
            FILE_SHARE_NONE,
            None,
            OPEN_EXISTING,
            Default::default(),
            None,
        )?
    };
    let guard = HandleGuard(handle);

    write_json_line(guard.0, command)?;
    let line = read_line(guard.0)?;
    Ok(serde_json::from_str(line.trim())?)
}

/// Checks whether the host's pipe exists without consuming a connection.
pub fn is_host_running() -> bool {
    let pipe_name = HSTRING::from(PIPE_NAME);

    // SAFETY: WaitNamedPipeW only checks for an available instance;
    // a 1 ms timeout returns almost immediately.
    unsafe { WaitNamedPipeW(&pipe_name, 1).as_bool() }
}

fn write_json_line(handle: HANDLE, value: &impl Serialize) -> WindowResult<()> {
    let mut writer = duplicate_handle_as_file(handle)?;
    let json = serde_json::to_string(value)?;
    writeln!(writer, "{json}")?;
    writer.flush()?;
    Ok(())
}

fn read_line(handle: HANDLE) -> WindowResult<String> {
    let mut reader = BufReader::new(duplicate_handle_as_file(handle)?);
    let mut line = String::new();
    reader.read_line(&mut line)?;
    Ok(line)
}

/// Duplicates a HANDLE and wraps it as a `File`.
///
/// The duplicate is owned and closed by the `File`, independently of the
/// original handle.
fn duplicate_handle_as_file(handle: HANDLE) -> WindowResult<File> {
    let mut dup = HANDLE::default();

    // SAFETY: DuplicateHandle writes a new handle into `dup`, which the
    // returned File takes ownership of.
    unsafe {
        DuplicateHandle(
            GetCurrentProcess(),
            handle,
            GetCurrentProcess(),
            &mut dup,
            0,
            false,
            DUPLICATE_SAME_ACCESS,
        )?;

        Ok(File::from_raw_handle(dup.0))
    }
}
