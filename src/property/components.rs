use super::{models::Property, PropertyScope};
use crate::components::Component;
use ammonia::clean;

pub struct PropertyPicker<'a> {
    pub scope: &'a PropertyScope,
}
impl Component for PropertyPicker<'_> {
    fn render(&self) -> String {
        let body = if self.scope.is_loading() {
            r##"<p class="text-gray-500" hx-get="/properties" hx-trigger="every 1s" hx-target="#property-picker">
                Loading properties...
            </p>"##
                .to_string()
        } else if self.scope.properties().is_empty() {
            r#"<p class="text-gray-500">No properties found.</p>"#.to_string()
        } else {
            let selected_id = self.scope.selected().map(|p| p.id);
            self.scope
                .properties()
                .iter()
                .map(|p| {
                    PropertyOption {
                        property: p,
                        is_selected: Some(p.id) == selected_id,
                    }
                    .render()
                })
                .collect::<Vec<String>>()
                .join("")
        };
        format!(
            r##"
            <main id="property-picker" class="max-w-3xl">
                <div class="flex items-center justify-between mb-4">
                    <h1 class="text-2xl font-bold">Properties</h1>
                    <button
                        hx-post="/properties/reload"
                        hx-target="#property-picker"
                        class="text-sm rounded border px-3 py-1 hover:bg-gray-100"
                    >Reload</button>
                </div>
                <div class="flex flex-col gap-2">{body}</div>
            </main>
            "##
        )
    }
}

pub struct PropertyOption<'a> {
    pub property: &'a Property,
    pub is_selected: bool,
}
impl Component for PropertyOption<'_> {
    fn render(&self) -> String {
        let p = self.property;
        let (ring, label) = if self.is_selected {
            ("ring-2 ring-blue-400", "Selected")
        } else {
            ("", "Select")
        };
        let contact = [p.phone.as_deref(), p.email.as_deref()]
            .into_iter()
            .flatten()
            .map(clean)
            .collect::<Vec<String>>()
            .join(" &middot; ");
        format!(
            r#"
            <form
                hx-post="/properties/select"
                class="flex items-center justify-between p-4 bg-white rounded shadow {ring}"
            >
                <input type="hidden" name="id" value="{id}" />
                <div>
                    <h2 class="font-medium">{name}</h2>
                    <p class="text-sm text-gray-600">{address}, {city}</p>
                    <p class="text-xs text-gray-500">{contact}</p>
                </div>
                <button class="text-sm rounded bg-blue-100 px-3 py-1 hover:bg-blue-200">{label}</button>
            </form>
            "#,
            id = p.id,
            name = clean(&p.name),
            address = clean(&p.address),
            city = clean(&p.city),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::{
        fakes::StaticLister, load, models::fixtures::property,
    };
    use std::time::Duration;
    use tokio::sync::RwLock;

    #[test]
    fn test_picker_while_loading() {
        let scope = PropertyScope::new();
        let html = PropertyPicker { scope: &scope }.render();
        assert!(html.contains("Loading properties"));
    }

    #[tokio::test]
    async fn test_picker_marks_selection_and_escapes_names() {
        let scope = RwLock::new(PropertyScope::new());
        load(
            &scope,
            &StaticLister(vec![
                property(1, "Kost <script>alert(1)</script>"),
                property(2, "Kost Mawar"),
            ]),
            Duration::from_secs(1),
        )
        .await;
        let scope = scope.into_inner();

        let html = PropertyPicker { scope: &scope }.render();

        assert!(!html.contains("<script>alert"));
        assert!(html.contains("Kost Mawar"));
        assert_eq!(html.matches(">Selected<").count(), 1);
        assert_eq!(html.matches(">Select<").count(), 1);
    }
}
