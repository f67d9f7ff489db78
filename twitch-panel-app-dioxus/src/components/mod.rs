mod channel_picker;
mod stream_info;
mod twitch_panel;

pub use channel_picker::ChannelPicker;
pub use stream_info::StreamInfo;
pub use twitch_panel::TwitchPanel;
