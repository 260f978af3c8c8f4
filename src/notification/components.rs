use super::{
    models::{CategoryFilter, Notification, NotificationType, Priority},
    NotificationCenter,
};
use crate::components::Component;
use ammonia::clean;

/// Everything under the notifications heading. Every notification action
/// answers with a fresh render of this panel.
pub struct NotificationPanel<'a> {
    pub center: &'a NotificationCenter,
}
impl Component for NotificationPanel<'_> {
    fn render(&self) -> String {
        let unread = self.center.unread_count();
        let badge = UnreadBadge { count: unread }.render();
        let mark_all_disabled = if unread == 0 { "disabled" } else { "" };
        let filters = FilterBar {
            active: self.center.category_filter(),
            unread_only: self.center.unread_only(),
        }
        .render();
        let list = NotificationList {
            items: &self.center.derive_visible(),
        }
        .render();
        let dialog = self
            .center
            .pending_delete()
            .map(|candidate| DeleteConfirm { candidate }.render())
            .unwrap_or_default();
        format!(
            r##"
            <section id="notification-panel" class="max-w-3xl">
                <div class="flex justify-between items-center mb-4">
                    <div class="flex items-center gap-2">
                        <h1 class="text-2xl font-bold">Notifications</h1>
                        {badge}
                    </div>
                    <button
                        hx-post="/notifications/read-all"
                        hx-target="#notification-panel"
                        class="text-sm rounded border px-3 py-1 hover:bg-gray-100 disabled:opacity-50"
                        {mark_all_disabled}
                    >Mark all read</button>
                </div>
                {filters}
                {list}
                {dialog}
            </section>
            "##
        )
    }
}

pub struct UnreadBadge {
    pub count: usize,
}
impl Component for UnreadBadge {
    fn render(&self) -> String {
        if self.count == 0 {
            "".to_string()
        } else {
            format!(
                r#"<span class="rounded-full bg-blue-100 text-blue-800 text-xs px-2 py-1">{} new</span>"#,
                self.count
            )
        }
    }
}

pub struct FilterBar {
    pub active: CategoryFilter,
    pub unread_only: bool,
}
impl Component for FilterBar {
    fn render(&self) -> String {
        let buttons = CategoryFilter::ALL
            .iter()
            .map(|f| {
                let style = if *f == self.active {
                    "bg-blue-600 text-white"
                } else {
                    "border hover:bg-gray-100"
                };
                format!(
                    r##"<button
                        hx-post="/notifications/filter/category/{value}"
                        hx-target="#notification-panel"
                        class="text-sm rounded px-3 py-1 {style}"
                    >{name}</button>"##,
                    value = f.as_str(),
                    name = f.get_display_name(),
                )
            })
            .collect::<Vec<String>>()
            .join("");
        let checked_state = if self.unread_only { "checked" } else { "" };
        format!(
            r##"
            <div class="flex flex-wrap items-center gap-2 mb-2">{buttons}</div>
            <form
                hx-post="/notifications/filter/unread-only"
                hx-trigger="change"
                hx-target="#notification-panel"
                class="flex items-center gap-2 mb-4 text-sm text-gray-600"
            >
                <input class="rounded" type="checkbox" name="unread_only" id="unread_only" {checked_state} />
                <label for="unread_only">Show unread only</label>
            </form>
            "##
        )
    }
}

pub struct NotificationList<'a> {
    pub items: &'a [&'a Notification],
}
impl Component for NotificationList<'_> {
    fn render(&self) -> String {
        if self.items.is_empty() {
            return r#"<div class="p-8 text-center text-gray-500 bg-white rounded shadow">No notifications found</div>"#
                .to_string();
        }
        let items = self
            .items
            .iter()
            .map(|n| NotificationItem { notification: n }.render())
            .collect::<Vec<String>>()
            .join("");
        format!(
            r#"<div class="bg-white rounded shadow divide-y divide-gray-100">{items}</div>"#
        )
    }
}

pub struct NotificationItem<'a> {
    pub notification: &'a Notification,
}
impl Component for NotificationItem<'_> {
    fn render(&self) -> String {
        let n = self.notification;
        let (row_bg, mark_read) = if n.read {
            ("", "".to_string())
        } else {
            (
                "bg-blue-50",
                format!(
                    r##"<button
                        hx-post="/notifications/item/{id}/read"
                        hx-target="#notification-panel"
                        class="text-sm rounded border px-2 py-1 hover:bg-gray-100"
                    >Mark read</button>"##,
                    id = n.id
                ),
            )
        };
        format!(
            r##"
            <div class="p-4 hover:bg-gray-50 {row_bg}">
                <div class="flex items-start gap-4">
                    <span class="text-xs rounded-full px-2 py-1 {type_style}">{type_name}</span>
                    <div class="flex-1">
                        <div class="flex items-start justify-between">
                            <div>
                                <h3 class="font-medium">{title}</h3>
                                <p class="mt-1 text-sm text-gray-600">{message}</p>
                            </div>
                            <span class="text-xs rounded-full px-2 py-1 {priority_style}">{priority}</span>
                        </div>
                        <div class="mt-2 flex items-center justify-between">
                            <span class="text-xs text-gray-500">{date}</span>
                            <div class="flex gap-2">
                                {mark_read}
                                <button
                                    hx-post="/notifications/item/{id}/delete"
                                    hx-target="#notification-panel"
                                    class="text-sm rounded bg-red-100 px-2 py-1 hover:bg-red-200"
                                >Delete</button>
                            </div>
                        </div>
                    </div>
                </div>
            </div>
            "##,
            id = n.id,
            title = clean(&n.title),
            message = clean(&n.message),
            type_name = n.r#type.get_display_name(),
            type_style = type_style(n.r#type),
            priority = n.priority,
            priority_style = priority_style(n.priority),
            date = n.date.format("%d %b %Y %H:%M"),
        )
    }
}

fn type_style(ty: NotificationType) -> &'static str {
    match ty {
        NotificationType::Payment => "bg-red-100 text-red-800",
        NotificationType::Maintenance => "bg-blue-100 text-blue-800",
        NotificationType::System => "bg-gray-100 text-gray-800",
        NotificationType::Tenant => "bg-green-100 text-green-800",
    }
}

fn priority_style(priority: Priority) -> &'static str {
    match priority {
        Priority::High => "bg-red-100 text-red-800",
        Priority::Normal => "bg-blue-100 text-blue-800",
        Priority::Low => "bg-gray-100 text-gray-800",
    }
}

pub struct DeleteConfirm<'a> {
    pub candidate: &'a Notification,
}
impl Component for DeleteConfirm<'_> {
    fn render(&self) -> String {
        format!(
            r##"
            <div id="delete-confirm" class="fixed inset-0 bg-black bg-opacity-50 flex items-center justify-center z-50">
                <div class="bg-white rounded-lg shadow-xl w-full max-w-md p-6">
                    <h3 class="text-lg font-semibold mb-4">Delete notification</h3>
                    <p class="text-gray-600 mb-2">"{title}"</p>
                    <p class="text-gray-600 mb-6">
                        Are you sure you want to delete this notification? This cannot be undone.
                    </p>
                    <div class="flex justify-end gap-3">
                        <button
                            hx-post="/notifications/delete/cancel"
                            hx-target="#notification-panel"
                            class="rounded border px-3 py-1"
                        >Cancel</button>
                        <button
                            hx-post="/notifications/delete/confirm"
                            hx-target="#notification-panel"
                            class="rounded bg-red-600 text-white px-3 py-1"
                        >Delete</button>
                    </div>
                </div>
            </div>
            "##,
            title = clean(&self.candidate.title),
        )
    }
}

pub struct NewNotificationForm {}
impl Component for NewNotificationForm {
    fn render(&self) -> String {
        let types = [
            NotificationType::Payment,
            NotificationType::Maintenance,
            NotificationType::Tenant,
            NotificationType::System,
        ]
        .iter()
        .map(|t| {
            format!(
                r#"<option value="{}">{}</option>"#,
                t.as_str(),
                t.get_display_name()
            )
        })
        .collect::<Vec<String>>()
        .join("");
        format!(
            r##"
            <form
                hx-post="/notifications"
                hx-target="#notification-panel"
                hx-on::after-request="this.reset()"
                class="max-w-3xl flex flex-col gap-2 p-4 mt-6 bg-white rounded shadow"
            >
                <h2 class="font-semibold">New notification</h2>
                <input class="rounded" type="text" name="title" placeholder="Title" required />
                <textarea class="rounded" name="message" placeholder="Message" required></textarea>
                <div class="flex gap-2">
                    <select class="rounded" name="type">{types}</select>
                    <select class="rounded" name="priority">
                        <option value="high">high</option>
                        <option value="normal" selected>normal</option>
                        <option value="low">low</option>
                    </select>
                    <button class="rounded bg-blue-100 px-3 py-1 hover:bg-blue-200">Create</button>
                </div>
            </form>
            "##
        )
    }
}
