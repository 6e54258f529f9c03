use lms_core::{NotificationRecord, fallback_set};
use lms_gateway::{Gateway, GatewayResult};

use async_trait::async_trait;

/// Where notification records come from and where read-marks go.
#[async_trait]
pub trait NotificationSource: Send + Sync {
    /// Short label used in log lines.
    fn name(&self) -> &'static str;

    async fn fetch(&self) -> GatewayResult<Vec<NotificationRecord>>;

    async fn mark_read(&self, id: u64) -> GatewayResult<()>;

    async fn mark_all_read(&self) -> GatewayResult<()>;
}

/// Notifications served by the platform API.
#[derive(Clone)]
pub struct RemoteNotificationSource {
    gateway: Gateway,
}

impl RemoteNotificationSource {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl NotificationSource for RemoteNotificationSource {
    fn name(&self) -> &'static str {
        "remote"
    }

    async fn fetch(&self) -> GatewayResult<Vec<NotificationRecord>> {
        self.gateway.notifications().await
    }

    async fn mark_read(&self, id: u64) -> GatewayResult<()> {
        self.gateway.mark_notification_read(id).await
    }

    async fn mark_all_read(&self) -> GatewayResult<()> {
        self.gateway.mark_all_notifications_read().await
    }
}

/// The fixed demo set. Read-marks have nowhere to go and always succeed.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackNotificationSource;

#[async_trait]
impl NotificationSource for FallbackNotificationSource {
    fn name(&self) -> &'static str {
        "fallback"
    }

    async fn fetch(&self) -> GatewayResult<Vec<NotificationRecord>> {
        Ok(fallback_set())
    }

    async fn mark_read(&self, _id: u64) -> GatewayResult<()> {
        Ok(())
    }

    async fn mark_all_read(&self) -> GatewayResult<()> {
        Ok(())
    }
}
