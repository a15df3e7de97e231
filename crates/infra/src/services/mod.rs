mod push;

pub use push::{
    IPushSender, InMemoryPushSender, PushAttempt, PushError, VapidKeyError, WebPushSender,
};
