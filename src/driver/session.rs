use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::driver::error::DriverError;
use crate::driver::gesture::Gesture;
use crate::driver::snapshot::ElementSnapshot;
use crate::driver::{Driver, ElementTarget};

/// Request sent to the bridge over stdin (one JSON line).
#[derive(Debug, Serialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum BridgeRequest<'a> {
    Snapshot,
    Gesture {
        target: &'a ElementTarget,
        gesture: &'a Gesture,
    },
    Quit,
}

impl BridgeRequest<'_> {
    fn name(&self) -> &'static str {
        match self {
            BridgeRequest::Snapshot => "snapshot",
            BridgeRequest::Gesture { .. } => "gesture",
            BridgeRequest::Quit => "quit",
        }
    }
}

/// Response read from the bridge's stdout (one JSON line).
#[derive(Debug, Deserialize)]
pub struct BridgeResponse {
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub ready: Option<bool>,
    #[serde(default)]
    pub tree: Option<ElementSnapshot>,
}

struct Channel {
    child: Child,
    stdin: ChildStdin,
    reader: BufReader<ChildStdout>,
}

/// Driver backed by a long-lived host automation bridge.
///
/// The bridge is any executable that prints `{"ok":true,"ready":true}` once it
/// is attached to the application, then answers one JSON line per request.
pub struct ProcessDriver {
    command: String,
    channel: Mutex<Channel>,
}

impl ProcessDriver {
    pub fn launch(command: &str, args: &[String]) -> Result<Self, DriverError> {
        let mut child = Command::new(command)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| DriverError::Spawn {
                command: command.to_string(),
                source: e,
            })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| DriverError::Io(format!("failed to capture stdin of {}", command)))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| DriverError::Io(format!("failed to capture stdout of {}", command)))?;

        let mut reader = BufReader::new(stdout);
        let ready = read_response(&mut reader, "ready signal")?;
        if !ready.ok || ready.ready != Some(true) {
            return Err(DriverError::Protocol {
                command: "launch".into(),
                error: format!("{} did not send a ready signal", command),
            });
        }

        tracing::info!(command, "bridge ready");
        Ok(ProcessDriver {
            command: command.to_string(),
            channel: Mutex::new(Channel {
                child,
                stdin,
                reader,
            }),
        })
    }

    fn send(&self, request: &BridgeRequest<'_>) -> Result<BridgeResponse, DriverError> {
        let json = serde_json::to_string(request).map_err(|e| DriverError::Json {
            context: "bridge request".into(),
            source: e,
        })?;

        let mut channel = self
            .channel
            .lock()
            .map_err(|_| DriverError::Io("bridge channel lock poisoned".into()))?;

        writeln!(channel.stdin, "{}", json)
            .and_then(|_| channel.stdin.flush())
            .map_err(|e| DriverError::Io(format!("failed to write to {}: {}", self.command, e)))?;

        let response = read_response(&mut channel.reader, request.name())?;
        if !response.ok {
            return Err(DriverError::Protocol {
                command: request.name().into(),
                error: response.error.unwrap_or_else(|| "unknown error".into()),
            });
        }
        Ok(response)
    }

    pub fn quit(&self) {
        let _ = self.send(&BridgeRequest::Quit);
        if let Ok(mut channel) = self.channel.lock() {
            let _ = channel.child.wait();
        }
    }
}

fn read_response(
    reader: &mut BufReader<ChildStdout>,
    context: &str,
) -> Result<BridgeResponse, DriverError> {
    let mut line = String::new();
    reader
        .read_line(&mut line)
        .map_err(|e| DriverError::Io(format!("failed to read {}: {}", context, e)))?;

    if line.trim().is_empty() {
        return Err(DriverError::Io(format!(
            "empty {} from bridge (process may have died)",
            context
        )));
    }

    serde_json::from_str(line.trim()).map_err(|e| DriverError::Json {
        context: context.to_string(),
        source: e,
    })
}

impl Driver for ProcessDriver {
    fn snapshot(&self) -> Result<ElementSnapshot, DriverError> {
        let response = self.send(&BridgeRequest::Snapshot)?;
        response.tree.ok_or_else(|| DriverError::Protocol {
            command: "snapshot".into(),
            error: "no tree in snapshot response".into(),
        })
    }

    fn perform(&self, target: &ElementTarget, gesture: &Gesture) -> Result<(), DriverError> {
        self.send(&BridgeRequest::Gesture { target, gesture })?;
        Ok(())
    }
}

impl Drop for ProcessDriver {
    fn drop(&mut self) {
        self.quit();
    }
}
