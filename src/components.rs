// In many cases, we need to do a let binding to satisfy the borrow checker
// and for some reason, clippy identifies those as unnecessary.
#![allow(clippy::let_and_return)]

use super::property::models::Property;
use ammonia::clean;

const HTMX_SRC: &str = "https://unpkg.com/htmx.org@1.9.6";
const TAILWIND_SRC: &str = "https://cdn.tailwindcss.com";

pub trait Component {
    /// Render the component to a HTML string. By convention, the
    /// implementation should sanitize all string properties at render-time
    fn render(&self) -> String;
}

pub struct Page<'a> {
    pub title: &'a str,
    pub children: Box<dyn Component + 'a>,
}

impl Component for Page<'_> {
    fn render(&self) -> String {
        format!(
            r#"
            <html>
                <head>
                    <meta name="viewport" content="width=device-width, initial-scale=1.0"></meta>
                    <title>{title}</title>
                    <script src="{TAILWIND_SRC}"></script>
                </head>
                <body hx-boost="true" class="bg-gray-50 text-gray-900 mt-2 ml-2 sm:mt-8 sm:ml-8">
                    {body_html}
                    <script src="{HTMX_SRC}"></script>
                    <script>
                        htmx.config.defaultSwapStyle = "outerHTML"
                    </script>
                </body>
            </html>
            "#,
            title = clean(self.title),
            body_html = self.children.render()
        )
    }
}

/// Page header for property-scoped views, naming the active property and
/// linking back to the picker.
pub struct ScopeHeader<'a> {
    pub property: &'a Property,
}
impl Component for ScopeHeader<'_> {
    fn render(&self) -> String {
        format!(
            r#"
            <header class="flex items-center justify-between max-w-3xl mb-4">
                <div>
                    <p class="text-xs text-gray-500">Active property</p>
                    <h2 class="text-lg font-semibold">{name}</h2>
                    <p class="text-sm text-gray-600">{address}, {city}</p>
                </div>
                <a class="text-sm text-blue-600 hover:underline" href="/properties">
                    Switch property
                </a>
            </header>
            "#,
            name = clean(&self.property.name),
            address = clean(&self.property.address),
            city = clean(&self.property.city),
        )
    }
}

/// Components rendered one after the other.
pub struct Stack<'a> {
    pub children: Vec<Box<dyn Component + 'a>>,
}
impl Component for Stack<'_> {
    fn render(&self) -> String {
        let html = self
            .children
            .iter()
            .map(|c| c.render())
            .collect::<Vec<String>>()
            .join("");
        html
    }
}
