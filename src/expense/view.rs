//! HTML pieces shared by the expenses page and the summary page.

use maud::{Markup, html};

use crate::html::{BUTTON_SECONDARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, LINK_STYLE};

use super::filter::ExpenseFilter;

/// A GET form that reloads `route` with the chosen filter as query parameters.
///
/// The current values of `filter` are selected in the form so that the filter
/// survives a page reload.
pub(super) fn filter_form(route: &str, filter: &ExpenseFilter, categories: &[String]) -> Markup {
    html! {
        form
            id="filter-form"
            method="get"
            action=(route)
            class="grid w-full gap-4 md:grid-cols-4 items-end"
        {
            div
            {
                label for="filter-category" class=(FORM_LABEL_STYLE) { "Category" }

                select
                    name="category"
                    id="filter-category"
                    class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value="" { "All categories" }

                    @for category in categories {
                        option
                            value=(category)
                            selected[filter.category() == Some(category.as_str())]
                        {
                            (category)
                        }
                    }
                }
            }

            div
            {
                label for="start_date" class=(FORM_LABEL_STYLE) { "From" }

                input
                    name="start_date"
                    id="start_date"
                    type="date"
                    value=[filter.start_date]
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="end_date" class=(FORM_LABEL_STYLE) { "To" }

                input
                    name="end_date"
                    id="end_date"
                    type="date"
                    value=[filter.end_date]
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div class="flex gap-4 items-center"
            {
                button type="submit" class=(BUTTON_SECONDARY_STYLE) { "Filter" }

                @if filter.is_active() {
                    a href=(route) class=(LINK_STYLE) { "Clear" }
                }
            }
        }
    }
}
