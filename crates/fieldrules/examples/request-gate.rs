//! Startup registration followed by concurrent validation in request handlers.
//!
//! Run with:
//!   cargo run --example request-gate

use std::sync::Arc;
use std::thread;

use fieldrules::{message_shape, Registry, RegistryBuilder};

struct UpdateCallMembersRequest {
    call_type: String,
    call_id: String,
    remove_members: Vec<String>,
}

message_shape!(UpdateCallMembersRequest as "UpdateCallMembersRequest" {
    call_type: Text,
    call_id: Text,
    remove_members: List,
});

struct CallRecordingStartedEvent {
    call_cid: String,
    egress_id: Option<String>,
}

message_shape!(CallRecordingStartedEvent as "CallRecordingStartedEvent" {
    call_cid: Text,
    egress_id: Text,
});

fn build_registry() -> Registry {
    let mut builder = RegistryBuilder::new();
    builder
        .register::<UpdateCallMembersRequest>(&[
            ("call_type", "required,oneof=default,audio_room,livestream"),
            ("call_id", "required,max=64"),
            ("remove_members", "max=100"),
        ])
        .register::<CallRecordingStartedEvent>(&[("call_cid", "required")]);
    builder.build()
}

/// Stand-in for a request handler that receives the registry by injection.
fn handle_update(registry: &Registry, request: &UpdateCallMembersRequest) -> String {
    match registry.validate(request) {
        Ok(()) => format!("updated {}:{}", request.call_type, request.call_id),
        Err(err) => format!("rejected: {err}"),
    }
}

fn main() {
    let registry = Arc::new(build_registry());

    let requests = vec![
        UpdateCallMembersRequest {
            call_type: "default".to_string(),
            call_id: "standup".to_string(),
            remove_members: vec!["bob".to_string()],
        },
        UpdateCallMembersRequest {
            call_type: "Default".to_string(),
            call_id: String::new(),
            remove_members: Vec::new(),
        },
    ];

    let handles: Vec<_> = requests
        .into_iter()
        .map(|request| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || handle_update(&registry, &request))
        })
        .collect();

    for handle in handles {
        match handle.join() {
            Ok(line) => println!("{line}"),
            Err(_) => eprintln!("handler panicked"),
        }
    }

    let event = CallRecordingStartedEvent {
        call_cid: "default:standup".to_string(),
        egress_id: None,
    };
    match registry.validate(&event) {
        Ok(()) => println!("event accepted"),
        Err(err) => println!("event rejected: {err}"),
    }
}
