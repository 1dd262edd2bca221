//! Event vocabularies, one enum per feature.
//!
//! Names on the wire are fixed strings, some with spaces (`"get soundcards"`).
//! `parse` returns `None` for anything a feature does not understand so the
//! caller takes its default arm.

/// Common surface of the per-feature event enums.
pub trait EventSet: Sized + Copy + Send + Sync + 'static {
    /// Wire name.
    fn as_str(self) -> &'static str;
    /// Map a wire name back to the event.
    fn parse(name: &str) -> Option<Self>;
}

/// Admin console events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminEvent {
    Login,
    Logout,
    Authorize,
    StateMixer,
    StateConnections,
    StateSession,
    AdminDomains,
    AdminProjects,
    UserRoles,
}

impl EventSet for AdminEvent {
    fn as_str(self) -> &'static str {
        match self {
            AdminEvent::Login => "login",
            AdminEvent::Logout => "logout",
            AdminEvent::Authorize => "authorize",
            AdminEvent::StateMixer => "state_mixer",
            AdminEvent::StateConnections => "state_connections",
            AdminEvent::StateSession => "state_session",
            AdminEvent::AdminDomains => "admin_domains",
            AdminEvent::AdminProjects => "admin_projects",
            AdminEvent::UserRoles => "user_roles",
        }
    }

    fn parse(name: &str) -> Option<Self> {
        match name {
            "login" => Some(AdminEvent::Login),
            "logout" => Some(AdminEvent::Logout),
            "authorize" => Some(AdminEvent::Authorize),
            "state_mixer" => Some(AdminEvent::StateMixer),
            "state_connections" => Some(AdminEvent::StateConnections),
            "state_session" => Some(AdminEvent::StateSession),
            "admin_domains" => Some(AdminEvent::AdminDomains),
            "admin_projects" => Some(AdminEvent::AdminProjects),
            "user_roles" => Some(AdminEvent::UserRoles),
            _ => None,
        }
    }
}

/// ALSA audio gateway events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayEvent {
    GetSoundcards,
    GetConfiguration,
    GetHwParams,
    PlayTone,
}

impl EventSet for GatewayEvent {
    fn as_str(self) -> &'static str {
        match self {
            GatewayEvent::GetSoundcards => "get soundcards",
            GatewayEvent::GetConfiguration => "get configuration",
            GatewayEvent::GetHwParams => "get hw params",
            GatewayEvent::PlayTone => "play tone",
        }
    }

    fn parse(name: &str) -> Option<Self> {
        match name {
            "get soundcards" => Some(GatewayEvent::GetSoundcards),
            "get configuration" => Some(GatewayEvent::GetConfiguration),
            "get hw params" => Some(GatewayEvent::GetHwParams),
            "play tone" => Some(GatewayEvent::PlayTone),
            _ => None,
        }
    }
}

/// Recorder events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecorderEvent {
    GetRecordings,
    LoadRecordings,
    SaveRecordings,
    AddRecording,
    DelRecording,
}

impl EventSet for RecorderEvent {
    fn as_str(self) -> &'static str {
        match self {
            RecorderEvent::GetRecordings => "get_recordings",
            RecorderEvent::LoadRecordings => "load_recordings",
            RecorderEvent::SaveRecordings => "save_recordings",
            RecorderEvent::AddRecording => "add_recording",
            RecorderEvent::DelRecording => "del_recording",
        }
    }

    fn parse(name: &str) -> Option<Self> {
        match name {
            "get_recordings" => Some(RecorderEvent::GetRecordings),
            "load_recordings" => Some(RecorderEvent::LoadRecordings),
            "save_recordings" => Some(RecorderEvent::SaveRecordings),
            "add_recording" => Some(RecorderEvent::AddRecording),
            "del_recording" => Some(RecorderEvent::DelRecording),
            _ => None,
        }
    }
}
