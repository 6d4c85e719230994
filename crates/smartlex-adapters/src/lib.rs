mod analyzer;
mod notifier;
mod store;
mod toast;

pub use analyzer::GeminiAnalyzer;
pub use notifier::DesktopNotifier;
pub use store::JsonFileStore;
pub use toast::ChannelToast;
