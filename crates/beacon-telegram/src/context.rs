use beacon_content::ContentStore;
use beacon_core::BeaconConfig;
use beacon_scheduler::SchedulerHandle;
use beacon_users::IdentityStore;

/// Everything a command handler needs, wired once at startup and shared
/// through the teloxide dependency map.
pub struct BotContext {
    pub config: BeaconConfig,
    /// The single configured zone; applied to reminder resolution and to
    /// every user-visible timestamp.
    pub tz: chrono_tz::Tz,
    pub scheduler: SchedulerHandle,
    pub content: ContentStore,
    pub users: IdentityStore,
}
