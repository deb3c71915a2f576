pub fn config_loaded(path: &str) -> String {
    format!("Loaded configuration from {path}")
}

pub fn api_url(url: &str) -> String {
    format!("HACKBOT_API_URL set to {url}")
}

pub fn error_channel(channel: &str) -> String {
    format!("HACKBOT_ERROR_CHANNEL set to {channel}")
}

pub fn logged_in(user: &str) -> String {
    format!("Logged in as {user}")
}

pub const SYNC_LOOP_START: &str = "Starting sync loop...";

pub fn sync_loop_fail(err: &str) -> String {
    format!("Sync loop failed: {err}")
}

pub const CONSOLE_START: &str = "Console transport ready; type messages, Ctrl-D to quit.";

pub fn invite_received(room_id: &str) -> String {
    format!("Received invite for room {room_id}")
}

pub fn join_invite_fail(err: &str) -> String {
    format!("Failed to join room after invite: {err}")
}

pub fn brain_backend(backend: &str) -> String {
    format!("Using {backend} brain")
}

pub fn report_send_fail(target: &str, err: &str) -> String {
    format!("Failed to deliver error report to {target}: {err}")
}
