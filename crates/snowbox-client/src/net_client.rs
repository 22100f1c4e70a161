use std::cell::RefCell;
use std::rc::Rc;

use bevy::log::warn;
use snowbox_core::net::messages::ClientMessage;
use snowbox_core::net::protocol::encode_client_message;

#[cfg(target_family = "wasm")]
use wasm_bindgen::prelude::*;

/// Text frames received from the WebSocket, waiting for the next frame.
#[derive(Default)]
struct FrameBuffer {
    frames: Vec<String>,
}

/// WebSocket client (non-Send resource for Bevy).
/// Uses Rc<RefCell> because WASM is single-threaded.
pub struct WsClient {
    #[cfg(target_family = "wasm")]
    ws: Option<web_sys::WebSocket>,
    buffer: Rc<RefCell<FrameBuffer>>,
    /// Frames sent before the socket opened, flushed on open.
    #[cfg_attr(not(target_family = "wasm"), allow(dead_code))]
    pending: Rc<RefCell<Vec<String>>>,
}

impl Default for WsClient {
    fn default() -> Self {
        Self::new()
    }
}

impl WsClient {
    pub fn new() -> Self {
        Self {
            #[cfg(target_family = "wasm")]
            ws: None,
            buffer: Rc::new(RefCell::new(FrameBuffer::default())),
            pending: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Connect to the server WebSocket.
    #[cfg(target_family = "wasm")]
    pub fn connect(&mut self, url: &str) -> Result<(), String> {
        let ws = web_sys::WebSocket::new(url).map_err(|e| format!("WebSocket error: {e:?}"))?;

        let buffer = Rc::clone(&self.buffer);
        let onmessage =
            Closure::<dyn FnMut(web_sys::MessageEvent)>::new(move |evt: web_sys::MessageEvent| {
                if let Some(text) = evt.data().as_string() {
                    buffer.borrow_mut().frames.push(text);
                }
            });
        ws.set_onmessage(Some(onmessage.as_ref().unchecked_ref()));
        onmessage.forget();

        let pending = Rc::clone(&self.pending);
        let ws_open = ws.clone();
        let onopen = Closure::<dyn FnMut()>::new(move || {
            web_sys::console::log_1(&"WebSocket connected".into());
            for frame in pending.borrow_mut().drain(..) {
                if let Err(e) = ws_open.send_with_str(&frame) {
                    web_sys::console::warn_1(&format!("Send error: {e:?}").into());
                }
            }
        });
        ws.set_onopen(Some(onopen.as_ref().unchecked_ref()));
        onopen.forget();

        let onerror = log_socket_event("WebSocket error");
        ws.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        onerror.forget();

        let onclose = log_socket_event("WebSocket closed");
        ws.set_onclose(Some(onclose.as_ref().unchecked_ref()));
        onclose.forget();

        self.ws = Some(ws);
        Ok(())
    }

    /// Stub for non-WASM targets (native check only).
    #[cfg(not(target_family = "wasm"))]
    pub fn connect(&mut self, _url: &str) -> Result<(), String> {
        Ok(())
    }

    /// Send a text frame, queueing it if the socket is still opening.
    #[cfg(target_family = "wasm")]
    pub fn send_text(&self, frame: String) -> Result<(), String> {
        let Some(ws) = &self.ws else {
            return Err("Not connected".to_string());
        };
        if ws.ready_state() == web_sys::WebSocket::CONNECTING {
            self.pending.borrow_mut().push(frame);
            return Ok(());
        }
        ws.send_with_str(&frame)
            .map_err(|e| format!("Send error: {e:?}"))
    }

    #[cfg(not(target_family = "wasm"))]
    pub fn send_text(&self, _frame: String) -> Result<(), String> {
        Ok(())
    }

    /// Encode and send a client message. Failures are logged; the game
    /// keeps running without the message.
    pub fn send_message(&self, msg: &ClientMessage) {
        let frame = match encode_client_message(msg) {
            Ok(frame) => frame,
            Err(e) => {
                warn!("Failed to encode {}: {e}", msg.message_type().as_str());
                return;
            },
        };
        if let Err(e) = self.send_text(frame) {
            warn!("Failed to send {}: {e}", msg.message_type().as_str());
        }
    }

    /// Drain all buffered frames.
    pub fn drain_frames(&self) -> Vec<String> {
        std::mem::take(&mut self.buffer.borrow_mut().frames)
    }

    /// Queue a frame as if the server had sent it.
    #[cfg(test)]
    pub fn inject_frame(&self, frame: impl Into<String>) {
        self.buffer.borrow_mut().frames.push(frame.into());
    }
}

/// Socket callback that only reports `what` on the browser console. The
/// event argument JS passes is ignored.
#[cfg(target_family = "wasm")]
fn log_socket_event(what: &'static str) -> Closure<dyn FnMut()> {
    Closure::<dyn FnMut()>::new(move || web_sys::console::log_1(&what.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_empties_buffer() {
        let client = WsClient::new();
        client.inject_frame("a");
        client.inject_frame("b");
        assert_eq!(client.drain_frames(), vec!["a", "b"]);
        assert!(client.drain_frames().is_empty());
    }

    #[test]
    fn native_stub_accepts_connect_and_sends() {
        let mut client = WsClient::new();
        client.connect("ws://localhost:8080/ws").unwrap();
        assert_eq!(client.send_text("{}".to_string()), Ok(()));
        assert!(client.drain_frames().is_empty());
    }
}
