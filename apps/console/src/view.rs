//! Text-table rendering for the list and detail views.

use shared::domain::{Company, Contact};

fn dash(value: Option<&str>) -> String {
    match value {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => "-".to_string(),
    }
}

fn render_table(header: &[&str], rows: &[Vec<String>], empty_message: &str) -> String {
    if rows.is_empty() {
        return empty_message.to_string();
    }

    let mut widths: Vec<usize> = header.iter().map(|cell| cell.len()).collect();
    for row in rows {
        for (index, cell) in row.iter().enumerate() {
            widths[index] = widths[index].max(cell.len());
        }
    }

    let render_row = |cells: &[String]| -> String {
        cells
            .iter()
            .enumerate()
            .map(|(index, cell)| format!("{cell:<width$}", width = widths[index]))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let header_cells: Vec<String> = header.iter().map(|cell| cell.to_string()).collect();
    let mut lines = vec![
        render_row(&header_cells),
        widths
            .iter()
            .map(|width| "-".repeat(*width))
            .collect::<Vec<_>>()
            .join("  "),
    ];
    lines.extend(rows.iter().map(|row| render_row(row)));
    lines.join("\n")
}

pub fn company_table(companies: &[&Company]) -> String {
    let rows: Vec<Vec<String>> = companies
        .iter()
        .map(|company| {
            vec![
                format!("{}", company.id.0),
                company.name.clone(),
                dash(company.city.as_deref()),
                dash(company.phone.as_deref()),
            ]
        })
        .collect();
    render_table(&["Id", "Name", "City", "Phone"], &rows, "No companies found")
}

pub fn contact_table(contacts: &[&Contact]) -> String {
    let rows: Vec<Vec<String>> = contacts
        .iter()
        .map(|contact| {
            vec![
                format!("{}", contact.id.0),
                contact.name.clone(),
                dash(contact.company.as_ref().map(|company| company.name.as_str())),
                dash(contact.city.as_deref()),
                dash(contact.phone.as_deref()),
            ]
        })
        .collect();
    render_table(
        &["Id", "Name", "Company", "City", "Phone"],
        &rows,
        "No contacts found",
    )
}

/// Hidden entirely when the filtered collection is empty.
pub fn pagination_line(current_page: usize, total_pages: usize) -> Option<String> {
    if total_pages == 0 {
        return None;
    }
    Some(format!("page {current_page} of {total_pages}"))
}

pub fn company_details(company: &Company) -> String {
    [
        format!("Name:           {}", company.name),
        format!("Email:          {}", dash(company.email.as_deref())),
        format!("Phone:          {}", dash(company.phone.as_deref())),
        format!("Address:        {}", dash(company.address.as_deref())),
        format!("City:           {}", dash(company.city.as_deref())),
        format!("Province/State: {}", dash(company.state.as_deref())),
        format!("Country:        {}", dash(company.country.as_deref())),
        format!("Postal code:    {}", dash(company.postal_code.as_deref())),
    ]
    .join("\n")
}

pub fn contact_details(contact: &Contact) -> String {
    [
        format!("Name:    {}", contact.name),
        format!("Email:   {}", dash(contact.email.as_deref())),
        format!("Phone:   {}", dash(contact.phone.as_deref())),
        format!("City:    {}", dash(contact.city.as_deref())),
        format!(
            "Company: {}",
            dash(contact.company.as_ref().map(|company| company.name.as_str()))
        ),
    ]
    .join("\n")
}
