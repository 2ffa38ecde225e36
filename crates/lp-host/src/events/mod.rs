//! Event Forwarding - push runtime events to connected windows
//! 事件转发 - 将运行时事件推送到已连接窗口
//!
//! Everything written to a connection is an [`OutboundFrame`]: either the
//! response to a request (carrying the request id) or a pushed event.

use lp_app::ProjectionEvent;
use serde::Serialize;

use crate::commands::CommandResponse;

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum OutboundFrame {
    Response {
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<u64>,
        #[serde(flatten)]
        response: CommandResponse,
    },
    Event {
        event: ProjectionEvent,
    },
}

impl OutboundFrame {
    pub fn response(id: Option<u64>, response: CommandResponse) -> Self {
        OutboundFrame::Response { id, response }
    }

    pub fn event(event: ProjectionEvent) -> Self {
        OutboundFrame::Event { event }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lp_core::{LiveState, SurfaceKey};
    use serde_json::json;

    #[test]
    fn response_frame_carries_request_id() {
        let frame = OutboundFrame::response(Some(7), CommandResponse::success("pong"));
        assert_eq!(
            serde_json::to_value(frame).unwrap(),
            json!({ "id": 7, "ok": true, "data": "pong" })
        );
    }

    #[test]
    fn event_frame_serializes_with_type_tag() {
        let frame = OutboundFrame::event(ProjectionEvent::SurfaceWindowChanged {
            surface: SurfaceKey::A,
            is_open: true,
        });
        assert_eq!(
            serde_json::to_value(frame).unwrap(),
            json!({ "event": { "type": "surface-window-changed", "surface": "A", "isOpen": true } })
        );

        let live = serde_json::to_value(OutboundFrame::event(ProjectionEvent::LiveStateChanged {
            state: LiveState::default(),
        }))
        .unwrap();
        assert_eq!(live["event"]["type"], "live-state-changed");
        assert_eq!(live["event"]["state"]["target"], "A");
    }
}
