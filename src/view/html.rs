//! Built-in HTML renderer.
//!
//! Every page shares one layout with a navigation bar. All values taken from
//! documents are escaped before they reach the output.

use std::fmt::{self, Write};

use crate::domain::{Category, Task};

use super::{ErrorPage, RenderError, View, ViewRenderer};

/// Default page title.
pub const DEFAULT_TITLE: &str = "Task Manager";

/// Escapes text for use in HTML element content and quoted attributes.
#[must_use]
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for character in input.chars() {
        match character {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Renders views as plain server-side HTML.
#[derive(Debug, Clone)]
pub struct HtmlRenderer {
    title: String,
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_TITLE)
    }
}

impl HtmlRenderer {
    /// Creates a renderer that uses `title` as the site title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }

    fn write_layout(&self, out: &mut String, heading: &str, body: &str) -> fmt::Result {
        let title = escape_html(&self.title);
        writeln!(out, "<!DOCTYPE html>")?;
        writeln!(out, "<html lang=\"en\">")?;
        writeln!(out, "<head>")?;
        writeln!(out, "<meta charset=\"utf-8\">")?;
        writeln!(
            out,
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">"
        )?;
        writeln!(out, "<title>{} | {title}</title>", escape_html(heading))?;
        writeln!(out, "</head>")?;
        writeln!(out, "<body>")?;
        writeln!(out, "<nav>")?;
        writeln!(out, "<a class=\"brand\" href=\"/\">{title}</a>")?;
        writeln!(out, "<ul>")?;
        writeln!(out, "<li><a href=\"/get_tasks\">Manage Tasks</a></li>")?;
        writeln!(out, "<li><a href=\"/add_task\">New Task</a></li>")?;
        writeln!(out, "<li><a href=\"/get_categories\">Manage Categories</a></li>")?;
        writeln!(out, "<li><a href=\"/add_category\">New Category</a></li>")?;
        writeln!(out, "</ul>")?;
        writeln!(out, "</nav>")?;
        writeln!(out, "<main>")?;
        writeln!(out, "<h1>{}</h1>", escape_html(heading))?;
        out.push_str(body);
        writeln!(out, "</main>")?;
        writeln!(out, "</body>")?;
        writeln!(out, "</html>")
    }
}

impl ViewRenderer for HtmlRenderer {
    fn render(&self, view: &View) -> Result<String, RenderError> {
        let template = view.template();
        let to_error = |source: fmt::Error| RenderError::Format { template, source };

        let mut body = String::new();
        let heading = match view {
            View::Tasks { tasks } => {
                write_task_list(&mut body, tasks).map_err(to_error)?;
                "Tasks"
            }
            View::AddTask { categories } => {
                write_task_form(&mut body, "/insert_task", None, categories, "Add Task")
                    .map_err(to_error)?;
                "Add Task"
            }
            View::EditTask { task, categories } => {
                let action = format!("/update_task/{}", task.id);
                write_task_form(&mut body, &action, Some(task), categories, "Edit Task")
                    .map_err(to_error)?;
                "Edit Task"
            }
            View::Categories { categories } => {
                write_category_list(&mut body, categories).map_err(to_error)?;
                "Categories"
            }
            View::AddCategory => {
                write_category_form(&mut body, "/insert_category", None, "Add Category")
                    .map_err(to_error)?;
                "Add Category"
            }
            View::EditCategory { category } => {
                let action = format!("/update_category/{}", category.id);
                write_category_form(&mut body, &action, Some(category), "Edit Category")
                    .map_err(to_error)?;
                "Edit Category"
            }
            View::Error(page) => {
                write_error(&mut body, page).map_err(to_error)?;
                "Error"
            }
        };

        let mut page = String::with_capacity(body.len() + 1024);
        self.write_layout(&mut page, heading, &body).map_err(to_error)?;
        Ok(page)
    }
}

// =============================================================================
// Page bodies
// =============================================================================

fn write_task_list(out: &mut String, tasks: &[Task]) -> fmt::Result {
    if tasks.is_empty() {
        writeln!(out, "<p class=\"empty\">You have no tasks.</p>")?;
        return writeln!(out, "<a href=\"/add_task\">Add a task</a>");
    }

    writeln!(out, "<ul class=\"tasks\">")?;
    for task in tasks {
        let fields = &task.fields;
        writeln!(out, "<li class=\"task\">")?;
        write!(out, "<strong>{}</strong>", escape_html(&fields.task_name))?;
        if fields.is_urgent {
            write!(out, " <span class=\"urgent\">Urgent</span>")?;
        }
        writeln!(out)?;
        if let Some(category_name) = &fields.category_name {
            writeln!(out, "<p class=\"category\">{}</p>", escape_html(category_name))?;
        }
        if let Some(due_date) = &fields.due_date {
            writeln!(out, "<p class=\"due-date\">Due: {}</p>", escape_html(due_date))?;
        }
        if let Some(description) = &fields.task_description {
            writeln!(out, "<p class=\"description\">{}</p>", escape_html(description))?;
        }
        writeln!(
            out,
            "<a class=\"edit\" href=\"/edit_task/{}\">Edit</a>",
            escape_html(task.id.as_str())
        )?;
        writeln!(out, "</li>")?;
    }
    writeln!(out, "</ul>")
}

fn write_task_form(
    out: &mut String,
    action: &str,
    task: Option<&Task>,
    categories: &[Category],
    submit_label: &str,
) -> fmt::Result {
    let fields = task.map(|task| &task.fields);
    let selected = fields.and_then(|fields| fields.category_name.as_deref());

    writeln!(out, "<form method=\"post\" action=\"{}\">", escape_html(action))?;

    writeln!(out, "<label for=\"category_name\">Category</label>")?;
    writeln!(out, "<select id=\"category_name\" name=\"category_name\">")?;
    writeln!(out, "<option value=\"\">Choose category</option>")?;
    for category in categories {
        let name = &category.fields.category_name;
        let marker = if selected == Some(name.as_str()) {
            " selected"
        } else {
            ""
        };
        let name = escape_html(name);
        writeln!(out, "<option value=\"{name}\"{marker}>{name}</option>")?;
    }
    // Keep a dangling reference selectable so saving the form does not drop it.
    if let Some(current) = selected {
        let known = categories
            .iter()
            .any(|category| category.fields.category_name == current);
        if !known {
            let current = escape_html(current);
            writeln!(out, "<option value=\"{current}\" selected>{current}</option>")?;
        }
    }
    writeln!(out, "</select>")?;

    let task_name = fields.map_or("", |fields| fields.task_name.as_str());
    writeln!(out, "<label for=\"task_name\">Task Name</label>")?;
    writeln!(
        out,
        "<input id=\"task_name\" name=\"task_name\" type=\"text\" value=\"{}\" required>",
        escape_html(task_name)
    )?;

    let description = fields
        .and_then(|fields| fields.task_description.as_deref())
        .unwrap_or_default();
    writeln!(out, "<label for=\"task_description\">Task Description</label>")?;
    writeln!(
        out,
        "<textarea id=\"task_description\" name=\"task_description\">{}</textarea>",
        escape_html(description)
    )?;

    let due_date = fields
        .and_then(|fields| fields.due_date.as_deref())
        .unwrap_or_default();
    writeln!(out, "<label for=\"due_date\">Due Date</label>")?;
    writeln!(
        out,
        "<input id=\"due_date\" name=\"due_date\" type=\"text\" value=\"{}\">",
        escape_html(due_date)
    )?;

    let checked = if fields.is_some_and(|fields| fields.is_urgent) {
        " checked"
    } else {
        ""
    };
    writeln!(
        out,
        "<label><input name=\"is_urgent\" type=\"checkbox\" value=\"on\"{checked}>"
    )?;
    writeln!(out, "Is Urgent</label>")?;

    writeln!(out, "<a href=\"/get_tasks\">Cancel</a>")?;
    writeln!(out, "<button type=\"submit\">{}</button>", escape_html(submit_label))?;
    writeln!(out, "</form>")
}

fn write_category_list(out: &mut String, categories: &[Category]) -> fmt::Result {
    writeln!(out, "<a href=\"/add_category\">Add Category</a>")?;
    if categories.is_empty() {
        return writeln!(out, "<p class=\"empty\">You have no categories.</p>");
    }

    writeln!(out, "<ul class=\"categories\">")?;
    for category in categories {
        let id = escape_html(category.id.as_str());
        writeln!(out, "<li class=\"category\">")?;
        writeln!(out, "<strong>{}</strong>", escape_html(&category.fields.category_name))?;
        writeln!(out, "<a class=\"edit\" href=\"/edit_category/{id}\">Edit</a>")?;
        writeln!(
            out,
            "<a class=\"delete\" href=\"/delete_category/{id}\">Delete</a>"
        )?;
        writeln!(out, "</li>")?;
    }
    writeln!(out, "</ul>")
}

fn write_category_form(
    out: &mut String,
    action: &str,
    category: Option<&Category>,
    submit_label: &str,
) -> fmt::Result {
    let category_name = category.map_or("", |category| category.fields.category_name.as_str());
    writeln!(out, "<form method=\"post\" action=\"{}\">", escape_html(action))?;
    writeln!(out, "<label for=\"category_name\">Category Name</label>")?;
    writeln!(
        out,
        "<input id=\"category_name\" name=\"category_name\" type=\"text\" value=\"{}\" required>",
        escape_html(category_name)
    )?;
    writeln!(out, "<a href=\"/get_categories\">Cancel</a>")?;
    writeln!(out, "<button type=\"submit\">{}</button>", escape_html(submit_label))?;
    writeln!(out, "</form>")
}

fn write_error(out: &mut String, page: &ErrorPage) -> fmt::Result {
    writeln!(
        out,
        "<p class=\"status\">{} {}</p>",
        page.status,
        escape_html(&page.code)
    )?;
    writeln!(out, "<p class=\"message\">{}</p>", escape_html(&page.message))?;
    if !page.details.is_empty() {
        writeln!(out, "<ul class=\"details\">")?;
        for (field, message) in &page.details {
            writeln!(
                out,
                "<li><code>{}</code>: {}</li>",
                escape_html(field),
                escape_html(message)
            )?;
        }
        writeln!(out, "</ul>")?;
    }
    writeln!(out, "<a href=\"/get_tasks\">Back to tasks</a>")
}

// =============================================================================
// Tests
// =============================================================================
