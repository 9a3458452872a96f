use std::io::{self, Write};

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use client_core::{
    ApiClient, CompanyDetailController, CompanyFormDialog, CompanyResource,
    ContactDetailController, ContactFormDialog, ContactResource, DetailState, ListController,
};
use shared::domain::{CompanyDraft, CompanyId, ContactDraft, ContactId};
use tracing_subscriber::EnvFilter;

mod config;
mod view;

#[derive(Parser, Debug)]
#[command(name = "console", about = "Management console for companies and contacts")]
struct Cli {
    /// Backend API base URL; overrides file and environment configuration.
    #[arg(long)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Browse and manage companies.
    Companies {
        #[command(subcommand)]
        action: Option<CompanyAction>,
    },
    /// Browse and manage contacts.
    Contacts {
        #[command(subcommand)]
        action: Option<ContactAction>,
    },
}

#[derive(Args, Debug, Default)]
struct ListArgs {
    /// Free-text filter over the searchable fields.
    #[arg(long, default_value = "")]
    search: String,
    /// 1-indexed page of ten items.
    #[arg(long, default_value_t = 1)]
    page: usize,
}

#[derive(Subcommand, Debug)]
enum CompanyAction {
    /// Search and page through the company list.
    List(ListArgs),
    /// Show one company with its contacts.
    Show { id: i64 },
    /// Create a company.
    Create(CompanyFields),
    /// Edit one company and submit the draft.
    Update {
        id: i64,
        #[command(flatten)]
        fields: CompanyFields,
    },
    /// Delete a company after confirmation.
    Delete {
        id: i64,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
enum ContactAction {
    /// Search and page through the contact list.
    List(ListArgs),
    /// Show one contact.
    Show { id: i64 },
    /// Create a contact.
    Create(ContactFields),
    /// Edit one contact and submit the draft.
    Update {
        id: i64,
        #[command(flatten)]
        fields: ContactFields,
    },
    /// Delete a contact after confirmation.
    Delete {
        id: i64,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Args, Debug)]
struct CompanyFields {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    address: Option<String>,
    #[arg(long)]
    city: Option<String>,
    #[arg(long)]
    state: Option<String>,
    #[arg(long)]
    country: Option<String>,
    #[arg(long)]
    postal_code: Option<String>,
}

impl CompanyFields {
    fn apply(self, draft: &mut CompanyDraft) {
        if let Some(name) = self.name {
            draft.name = name;
        }
        if let Some(email) = self.email {
            draft.email = Some(email);
        }
        if let Some(phone) = self.phone {
            draft.phone = Some(phone);
        }
        if let Some(address) = self.address {
            draft.address = Some(address);
        }
        if let Some(state) = self.state {
            draft.state = Some(state);
        }
        if let Some(city) = self.city {
            draft.city = Some(city);
        }
        if let Some(country) = self.country {
            draft.country = Some(country);
        }
        if let Some(postal_code) = self.postal_code {
            draft.postal_code = Some(postal_code);
        }
    }
}

#[derive(Args, Debug)]
struct ContactFields {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    city: Option<String>,
    #[arg(long)]
    company_id: Option<i64>,
}

impl ContactFields {
    fn apply(self, draft: &mut ContactDraft) {
        if let Some(name) = self.name {
            draft.name = name;
        }
        if let Some(email) = self.email {
            draft.email = Some(email);
        }
        if let Some(phone) = self.phone {
            draft.phone = Some(phone);
        }
        if let Some(city) = self.city {
            draft.city = Some(city);
        }
        if let Some(company_id) = self.company_id {
            draft.company_id = Some(CompanyId(company_id));
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    let settings = config::load_settings();
    let api_url = config::normalize_api_url(&cli.api_url.unwrap_or(settings.api_url));
    let api = ApiClient::new(api_url);
    tracing::debug!("using backend at {}", api.base_url());

    // Bare invocation lands on the company list, like the `/` route.
    match cli.command.unwrap_or(Command::Companies { action: None }) {
        Command::Companies { action } => {
            match action.unwrap_or(CompanyAction::List(ListArgs::default())) {
                CompanyAction::List(args) => company_list(api, args).await,
                CompanyAction::Show { id } => company_show(api, CompanyId(id)).await,
                CompanyAction::Create(fields) => company_create(api, fields).await,
                CompanyAction::Update { id, fields } => {
                    company_update(api, CompanyId(id), fields).await
                }
                CompanyAction::Delete { id, yes } => {
                    company_delete(api, CompanyId(id), yes).await
                }
            }
        }
        Command::Contacts { action } => {
            match action.unwrap_or(ContactAction::List(ListArgs::default())) {
                ContactAction::List(args) => contact_list(api, args).await,
                ContactAction::Show { id } => contact_show(api, ContactId(id)).await,
                ContactAction::Create(fields) => contact_create(api, fields).await,
                ContactAction::Update { id, fields } => {
                    contact_update(api, ContactId(id), fields).await
                }
                ContactAction::Delete { id, yes } => {
                    contact_delete(api, ContactId(id), yes).await
                }
            }
        }
    }
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt} [y/N] ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(matches!(
        line.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

fn print_company_page(list: &ListController<CompanyResource>) {
    println!("Companies");
    println!("{}", view::company_table(&list.visible()));
    if let Some(line) = view::pagination_line(list.current_page(), list.total_pages()) {
        println!("{line}");
    }
}

fn print_contact_page(list: &ListController<ContactResource>) {
    println!("Contacts");
    println!("{}", view::contact_table(&list.visible()));
    if let Some(line) = view::pagination_line(list.current_page(), list.total_pages()) {
        println!("{line}");
    }
}

async fn company_list(api: ApiClient, args: ListArgs) -> Result<()> {
    let mut list = ListController::new(CompanyResource(api));
    list.load().await;
    list.set_search_query(args.search);
    list.set_page(args.page);
    print_company_page(&list);
    Ok(())
}

async fn company_show(api: ApiClient, id: CompanyId) -> Result<()> {
    let mut detail = CompanyDetailController::new(api, id);
    detail.load().await;
    match detail.state() {
        DetailState::Loaded { entity, .. } => {
            println!("{}", view::company_details(entity));
            println!();
            println!("Contacts");
            let contacts: Vec<_> = detail.contacts().iter().collect();
            println!("{}", view::contact_table(&contacts));
        }
        _ => println!("Company not found"),
    }
    Ok(())
}

async fn company_create(api: ApiClient, fields: CompanyFields) -> Result<()> {
    let mut list = ListController::new(CompanyResource(api));
    list.load().await;

    let mut dialog = CompanyFormDialog::create();
    fields.apply(dialog.draft_mut());
    let saved = dialog
        .submit(|draft| {
            let list = &mut list;
            async move { list.create(&draft).await }
        })
        .await?;
    if saved {
        print_company_page(&list);
    }
    Ok(())
}

async fn company_update(api: ApiClient, id: CompanyId, fields: CompanyFields) -> Result<()> {
    let mut detail = CompanyDetailController::new(api, id);
    detail.load().await;
    let Some(draft) = detail.draft_mut() else {
        println!("Company not found");
        return Ok(());
    };
    fields.apply(draft);
    if detail.submit().await {
        println!("Company updated successfully!");
    }
    Ok(())
}

async fn company_delete(api: ApiClient, id: CompanyId, yes: bool) -> Result<()> {
    if !yes && !confirm("Are you sure you want to delete this company?")? {
        return Ok(());
    }
    let mut list = ListController::new(CompanyResource(api));
    list.load().await;
    if list.delete(id).await {
        print_company_page(&list);
    }
    Ok(())
}

async fn contact_list(api: ApiClient, args: ListArgs) -> Result<()> {
    let mut list = ListController::new(ContactResource(api));
    list.load().await;
    list.set_search_query(args.search);
    list.set_page(args.page);
    print_contact_page(&list);
    Ok(())
}

async fn contact_show(api: ApiClient, id: ContactId) -> Result<()> {
    let mut detail = ContactDetailController::new(api, id);
    detail.load().await;
    match detail.state() {
        DetailState::Loaded { entity, .. } => println!("{}", view::contact_details(entity)),
        _ => println!("Contact not found"),
    }
    Ok(())
}

async fn contact_create(api: ApiClient, fields: ContactFields) -> Result<()> {
    let mut list = ListController::new(ContactResource(api.clone()));
    list.load().await;

    let mut dialog = ContactFormDialog::create();
    dialog.load_company_options(&api).await;
    fields.apply(dialog.draft_mut());
    let saved = dialog
        .submit(|draft| {
            let list = &mut list;
            async move { list.create(&draft).await }
        })
        .await?;
    if saved {
        print_contact_page(&list);
    }
    Ok(())
}

async fn contact_update(api: ApiClient, id: ContactId, fields: ContactFields) -> Result<()> {
    let mut detail = ContactDetailController::new(api, id);
    detail.load().await;
    let Some(draft) = detail.draft_mut() else {
        println!("Contact not found");
        return Ok(());
    };
    fields.apply(draft);
    if detail.submit().await {
        println!("Contact updated successfully!");
    }
    Ok(())
}

async fn contact_delete(api: ApiClient, id: ContactId, yes: bool) -> Result<()> {
    if !yes && !confirm("Are you sure you want to delete this contact?")? {
        return Ok(());
    }
    let mut list = ListController::new(ContactResource(api));
    list.load().await;
    if list.delete(id).await {
        print_contact_page(&list);
    }
    Ok(())
}
