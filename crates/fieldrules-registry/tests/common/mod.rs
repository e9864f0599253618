#![allow(dead_code)]

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use fieldrules_registry::{message_shape, Registry, RegistryBuilder};

pub struct JoinCallRequest {
    pub call_id: String,
    pub token: String,
    pub session_id: String,
    pub location: String,
    pub create: bool,
}

message_shape!(JoinCallRequest as "JoinCallRequest" {
    call_id: Text,
    token: Text,
    session_id: Text,
    location: Text,
    create: Bool,
});

pub struct SendStatsRequest {
    pub session_id: String,
    pub sdk: String,
    pub webrtc_version: Option<String>,
    pub subscriber_stats: Vec<String>,
    pub publisher_stats: Vec<String>,
    pub audio_level: f64,
}

message_shape!(SendStatsRequest as "SendStatsRequest" {
    session_id: Text,
    sdk: Text,
    webrtc_version: Text,
    subscriber_stats: List,
    publisher_stats: List,
    audio_level: Float,
});

pub struct PushProvider {
    pub name: String,
}

pub struct CreateDeviceRequest {
    pub id: String,
    pub push_provider: String,
    pub user_email: Option<String>,
    pub voip_token: bool,
    pub provider: Option<PushProvider>,
}

message_shape!(CreateDeviceRequest as "CreateDeviceRequest" {
    id: Text,
    push_provider: Text,
    user_email: Text,
    voip_token: Bool,
    provider: Message,
});

pub struct CallReactionEvent {
    pub call_cid: String,
    pub reaction_type: String,
    pub emoji_code: Option<String>,
    pub member_count: u32,
}

message_shape!(CallReactionEvent as "CallReactionEvent" {
    call_cid: Text,
    reaction_type: Text,
    emoji_code: Text,
    member_count: UInt,
});

/// A type with a shape but no registered rules.
pub struct HealthCheckEvent {
    pub connection_id: String,
}

message_shape!(HealthCheckEvent as "HealthCheckEvent" {
    connection_id: Text,
});

pub fn registry() -> Registry {
    let mut builder = RegistryBuilder::new();
    builder
        .register::<JoinCallRequest>(&[
            ("call_id", "required,max=64"),
            ("token", "required,jwt"),
            ("session_id", "required,uuid"),
            ("location", "max=8"),
        ])
        .register::<SendStatsRequest>(&[
            ("session_id", "required"),
            ("sdk", "required,oneof=android,ios,web"),
            ("webrtc_version", "max=16"),
            ("subscriber_stats", "max=4"),
            ("publisher_stats", "max=4"),
            ("audio_level", "max=1"),
        ])
        .register::<CreateDeviceRequest>(&[
            ("id", "required,min=4,max=255"),
            ("push_provider", "required,oneof=firebase,apn,huawei,xiaomi"),
            ("user_email", "email"),
            ("provider", "required"),
        ])
        .register::<CallReactionEvent>(&[
            ("call_cid", "required"),
            ("reaction_type", "required,max=32"),
            ("member_count", "min=1,max=100"),
        ]);
    builder.build()
}

pub fn jwt() -> String {
    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
    let claims = URL_SAFE_NO_PAD.encode(r#"{"user_id":"alice","exp":1893456000}"#);
    format!("{header}.{claims}.c2lnbmF0dXJlLW5vdC1jaGVja2Vk")
}

pub fn join_call() -> JoinCallRequest {
    JoinCallRequest {
        call_id: "default:standup".to_string(),
        token: jwt(),
        session_id: "5f0c7e9a-1b2d-4c3e-8f90-a1b2c3d4e5f6".to_string(),
        location: "FRA".to_string(),
        create: true,
    }
}

pub fn send_stats() -> SendStatsRequest {
    SendStatsRequest {
        session_id: "s-1".to_string(),
        sdk: "android".to_string(),
        webrtc_version: Some("125.0.0".to_string()),
        subscriber_stats: vec!["inbound-rtp".to_string()],
        publisher_stats: Vec::new(),
        audio_level: 0.5,
    }
}

pub fn create_device() -> CreateDeviceRequest {
    CreateDeviceRequest {
        id: "device-token-1".to_string(),
        push_provider: "firebase".to_string(),
        user_email: None,
        voip_token: false,
        provider: Some(PushProvider {
            name: "fcm-prod".to_string(),
        }),
    }
}

pub fn reaction() -> CallReactionEvent {
    CallReactionEvent {
        call_cid: "default:standup".to_string(),
        reaction_type: "raised-hand".to_string(),
        emoji_code: None,
        member_count: 3,
    }
}
