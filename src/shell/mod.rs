//! The interactive storefront: one screen at a time, commands read line by line.

pub mod commands;
pub mod feedback;

use std::fmt::Display;
use std::io::Write;
use std::time::Duration;
use clap::Parser;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tokio::time::{sleep, Instant};
use tracing::{info, instrument, warn};

use crate::admin_actor::SaveOutcome;
use crate::app_system::StorefrontSystem;
use crate::cart_actor::QuantityChange;
use crate::domain::{Credentials, GateDecision, Identity, NewSale, Page, ProductForm, Registration};
use crate::error::ShellError;
use crate::ui::{NoticeBoard, NoticeKind, ViewSwitcher, BRIEF_NOTICE_DURATION};
use crate::view;
use commands::{Command, CommandLine, FormFields};
use feedback::NoticeText;

pub use commands::split_words;

/// Upper bound on gate redirects followed for one navigation.
const MAX_REDIRECTS: usize = 4;

const DASHBOARD_PANELS: [&str; 3] = ["sales", "users", "employees"];

const ENTRY_HELP: &str = "Log in with: login <email> <password>\n\
                          New here? register <email> <username> <password>\n\
                          Type `help` for every command.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Owns the running services and the screen state. Every command error ends
/// up as a notice; only terminal I/O failures are returned.
pub struct Shell<R, W> {
    system: StorefrontSystem,
    input: Lines<R>,
    out: W,
    notices: NoticeBoard,
    panels: ViewSwitcher,
    page: Page,
    identity: Option<Identity>,
    form: ProductForm,
    cart_open: bool,
}

impl<R, W> Shell<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(system: StorefrontSystem, input: R, out: W, notice_duration: Duration) -> Self {
        Self {
            system,
            input: input.lines(),
            out,
            notices: NoticeBoard::new(notice_duration),
            panels: ViewSwitcher::new(&DASHBOARD_PANELS),
            page: Page::Entry,
            identity: None,
            form: ProductForm::default(),
            cart_open: false,
        }
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn notices(&self) -> &NoticeBoard {
        &self.notices
    }

    pub fn into_parts(self) -> (StorefrontSystem, W) {
        (self.system, self.out)
    }

    /// Opens the entry screen, then reads commands until `quit` or end of input.
    pub async fn run(&mut self) -> Result<(), ShellError> {
        self.navigate(Page::Entry).await?;

        loop {
            self.show_notice()?;
            write!(self.out, "{}> ", self.page)?;
            self.out.flush()?;

            let Some(line) = self.input.next_line().await? else {
                writeln!(self.out)?;
                break;
            };
            let words = split_words(&line);
            if words.is_empty() {
                continue;
            }

            let command = match CommandLine::try_parse_from(words) {
                Ok(cli) => cli.command,
                Err(e) => {
                    writeln!(self.out, "{}", e.render())?;
                    continue;
                }
            };
            if self.execute(command).await? == Flow::Quit {
                break;
            }
        }

        self.show_notice()?;
        Ok(())
    }

    /// Loads `page` through the session gate, following redirects.
    #[instrument(skip(self))]
    pub async fn navigate(&mut self, page: Page) -> Result<(), ShellError> {
        let mut target = page;

        for _ in 0..MAX_REDIRECTS {
            let decision = match self.system.session.check_access(target).await {
                Ok(decision) => decision,
                Err(e) => {
                    self.notices.error(e.notice_text("Could not check the session"));
                    return Ok(());
                }
            };

            match decision {
                GateDecision::Granted(identity) => {
                    self.identity = Some(identity);
                    return self.enter(target).await;
                }
                GateDecision::Anonymous => {
                    self.identity = None;
                    return self.enter(Page::Entry).await;
                }
                GateDecision::Redirect { notice, to, after } => {
                    let kind = if target == Page::Entry { NoticeKind::Info } else { NoticeKind::Error };
                    info!(from = %target, to = %to, "Redirecting");
                    self.notices.notify(notice, kind, None);
                    self.show_notice()?;
                    sleep(after).await;
                    target = to;
                }
            }
        }

        warn!(page = %page, "Redirect limit reached");
        self.notices.error("Too many redirects, back to the entry screen");
        self.identity = None;
        self.enter(Page::Entry).await
    }

    /// Runs a granted page's feature load.
    async fn enter(&mut self, page: Page) -> Result<(), ShellError> {
        self.page = page;
        self.cart_open = false;

        if let Some(identity) = &self.identity {
            writeln!(self.out, "{}", view::render_identity(identity))?;
        }
        match page {
            Page::Entry => self.say(ENTRY_HELP),
            Page::Shop => self.show_catalog().await,
            Page::Inventory => self.show_products().await,
            Page::Dashboard => self.show_panel().await,
        }
    }

    pub async fn execute(&mut self, command: Command) -> Result<Flow, ShellError> {
        match command {
            Command::Login { email, password } => self.login(Credentials { email, password }).await?,
            Command::Register { email, username, password } => {
                match self.system.session.register(Registration::customer(email, username, password)).await {
                    Ok(()) => self.notices.success("Account created, you can log in now"),
                    Err(e) => self.notices.error(e.notice_text("Registration failed")),
                };
            }
            Command::Logout => self.logout().await?,
            Command::Go { page } => self.navigate(page).await?,

            Command::Catalog if self.on_page(Page::Shop) => self.show_catalog().await?,
            Command::Add { product_id } if self.on_page(Page::Shop) => self.add_to_cart(product_id).await?,
            Command::Cart if self.on_page(Page::Shop) => {
                self.cart_open = true;
                self.show_cart().await?;
            }
            Command::Qty { line, delta } if self.on_page(Page::Shop) => self.change_quantity(line, delta).await?,
            Command::Remove { line } if self.on_page(Page::Shop) => self.remove_line(line).await?,
            Command::Checkout if self.on_page(Page::Shop) => self.checkout().await?,
            Command::Close if self.on_page(Page::Shop) => {
                self.cart_open = false;
                self.show_cached_catalog().await?;
            }

            Command::Products if self.on_page(Page::Inventory) => self.show_products().await?,
            Command::Filter { term } if self.on_page(Page::Inventory) => self.filter(term.join(" ")).await?,
            Command::Edit { id } if self.on_page(Page::Inventory) => self.begin_edit(id).await?,
            Command::Cancel if self.on_page(Page::Inventory) => {
                if let Err(e) = self.system.admin.cancel_edit().await {
                    warn!(error = %e, "Cancel edit failed");
                }
                self.form = ProductForm::default();
                self.notices.info("Edit cancelled");
            }
            Command::Save(fields) if self.on_page(Page::Inventory) => self.save(fields).await?,
            Command::Delete { id } if self.on_page(Page::Inventory) => self.delete_product(id).await?,

            Command::Sales if self.on_page(Page::Dashboard) => self.open_panel("sales").await?,
            Command::Sell { product_id, quantity, customer } if self.on_page(Page::Dashboard) => {
                let sale = NewSale { product_id, quantity, customer: customer.join(" ") };
                self.register_sale(sale).await?;
            }
            Command::Users if self.on_page(Page::Dashboard) => self.open_panel("users").await?,
            Command::DeleteUser { id } if self.on_page(Page::Dashboard) => self.delete_user(id).await?,
            Command::Employees if self.on_page(Page::Dashboard) => self.open_panel("employees").await?,
            Command::DeleteEmployee { id } if self.on_page(Page::Dashboard) => self.delete_employee(id).await?,

            Command::Quit => return Ok(Flow::Quit),

            // A screen command used on the wrong screen; `on_page` already said so.
            _ => {}
        }
        Ok(Flow::Continue)
    }

    fn on_page(&mut self, page: Page) -> bool {
        if self.page == page {
            return true;
        }
        self.notices.error(format!("That command belongs to the {page} screen, use `go {page}` first"));
        false
    }

    fn say(&mut self, text: impl Display) -> Result<(), ShellError> {
        writeln!(self.out, "{text}")?;
        Ok(())
    }

    /// Prints the current notice unless it has already expired, then clears it.
    fn show_notice(&mut self) -> Result<(), ShellError> {
        if let Some(notice) = self.notices.visible(Instant::now()) {
            writeln!(self.out, "{}", view::render_notice(notice))?;
        }
        self.notices.dismiss();
        Ok(())
    }

    async fn confirm(&mut self, question: &str) -> Result<bool, ShellError> {
        write!(self.out, "{question} [y/N] ")?;
        self.out.flush()?;
        let answer = self.input.next_line().await?.unwrap_or_default();
        Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
    }

    // ---- session -------------------------------------------------------

    async fn login(&mut self, credentials: Credentials) -> Result<(), ShellError> {
        match self.system.session.login(credentials).await {
            Ok(identity) => {
                self.notices.success(format!("Welcome, {}", identity.display_name()));
                self.show_notice()?;
                self.navigate(identity.role.home_page()).await
            }
            Err(e) => {
                self.notices.error(e.notice_text("Login failed, check your email and password"));
                Ok(())
            }
        }
    }

    async fn logout(&mut self) -> Result<(), ShellError> {
        if let Err(e) = self.system.session.logout().await {
            self.notices.error(e.notice_text("Could not close the session"));
            return Ok(());
        }
        if let Err(e) = self.system.cart.clear().await {
            warn!(error = %e, "Could not clear the cart on logout");
        }
        self.form = ProductForm::default();
        self.notices.success("Session closed");
        self.show_notice()?;
        self.navigate(Page::Entry).await
    }

    // ---- shop ----------------------------------------------------------

    async fn show_catalog(&mut self) -> Result<(), ShellError> {
        match self.system.cart.load_catalog().await {
            Ok(products) => self.say(view::render_catalog(&products)),
            Err(e) => {
                self.notices.error(e.notice_text("Could not load the products"));
                self.show_cached_catalog().await
            }
        }
    }

    async fn show_cached_catalog(&mut self) -> Result<(), ShellError> {
        match self.system.cart.snapshot().await {
            Ok(snapshot) => self.say(view::render_catalog(&snapshot.catalog)),
            Err(e) => {
                warn!(error = %e, "Cart snapshot failed");
                Ok(())
            }
        }
    }

    async fn show_cart(&mut self) -> Result<(), ShellError> {
        match self.system.cart.snapshot().await {
            Ok(snapshot) => self.say(view::render_cart(&snapshot)),
            Err(e) => {
                self.notices.error(e.notice_text("Could not show the cart"));
                Ok(())
            }
        }
    }

    async fn refresh_cart_view(&mut self) -> Result<(), ShellError> {
        if self.cart_open {
            self.show_cart().await?;
        }
        Ok(())
    }

    async fn add_to_cart(&mut self, product_id: String) -> Result<(), ShellError> {
        match self.system.cart.add_to_cart(product_id).await {
            Ok(line) => {
                let message = format!("{} added to cart ({} in cart)", line.product.name, line.quantity);
                self.notices.notify(message, NoticeKind::Success, Some(BRIEF_NOTICE_DURATION));
            }
            Err(e) => {
                self.notices.error(e.notice_text("Could not add to cart"));
            }
        }
        self.refresh_cart_view().await
    }

    /// Turns a 1-based line number from the screen into an index.
    fn line_index(&mut self, line: usize) -> Option<usize> {
        let index = line.checked_sub(1);
        if index.is_none() {
            self.notices.error("Cart lines are numbered from 1");
        }
        index
    }

    async fn change_quantity(&mut self, line: usize, delta: i64) -> Result<(), ShellError> {
        let Some(index) = self.line_index(line) else {
            return Ok(());
        };
        match self.system.cart.change_quantity(index, delta).await {
            Ok(QuantityChange::Updated(line)) => {
                let message = format!("{}: {} in cart", line.product.name, line.quantity);
                self.notices.notify(message, NoticeKind::Info, Some(BRIEF_NOTICE_DURATION));
            }
            Ok(QuantityChange::Removed(line)) => {
                let message = format!("{} removed from cart", line.product.name);
                self.notices.notify(message, NoticeKind::Info, Some(BRIEF_NOTICE_DURATION));
            }
            Err(e) => {
                self.notices.error(e.notice_text("Could not change the quantity"));
            }
        }
        self.refresh_cart_view().await
    }

    async fn remove_line(&mut self, line: usize) -> Result<(), ShellError> {
        let Some(index) = self.line_index(line) else {
            return Ok(());
        };
        match self.system.cart.remove_line(index).await {
            Ok(line) => {
                let message = format!("{} removed from cart", line.product.name);
                self.notices.notify(message, NoticeKind::Info, Some(BRIEF_NOTICE_DURATION))
            }
            Err(e) => self.notices.error(e.notice_text("Could not remove the line")),
        };
        self.refresh_cart_view().await
    }

    async fn checkout(&mut self) -> Result<(), ShellError> {
        let Some(identity) = self.identity.clone() else {
            self.notices.error("You must log in first");
            return Ok(());
        };

        match self.system.cart.checkout(identity).await {
            Ok(receipt) => {
                let message = receipt.message.unwrap_or_else(|| "Purchase confirmed".to_string());
                self.notices.success(format!("{message}. Total: {}", view::format_price(receipt.total)));
                self.cart_open = false;
                self.show_cached_catalog().await
            }
            Err(e) => {
                self.notices.error(e.notice_text("Checkout failed, please try again"));
                Ok(())
            }
        }
    }

    // ---- inventory -----------------------------------------------------

    async fn show_products(&mut self) -> Result<(), ShellError> {
        match self.system.admin.load_products().await {
            Ok(_) => self.show_admin().await,
            Err(e) => {
                self.notices.error(e.notice_text("Could not load the products"));
                self.show_admin().await
            }
        }
    }

    async fn show_admin(&mut self) -> Result<(), ShellError> {
        match self.system.admin.snapshot().await {
            Ok(snapshot) => self.say(view::render_admin(&snapshot)),
            Err(e) => {
                warn!(error = %e, "Admin snapshot failed");
                Ok(())
            }
        }
    }

    async fn filter(&mut self, term: String) -> Result<(), ShellError> {
        match self.system.admin.filter(term).await {
            Ok(products) => self.say(view::render_inventory(&products, None)),
            Err(e) => {
                self.notices.error(e.notice_text("Could not filter the products"));
                Ok(())
            }
        }
    }

    async fn begin_edit(&mut self, id: String) -> Result<(), ShellError> {
        match self.system.admin.begin_edit(id).await {
            Ok(form) => {
                self.notices.info(format!("Editing {}, change fields with `save --<field> <value>`", form.name));
                self.say(view::render_form(&form))?;
                self.form = form;
            }
            Err(e) => {
                self.notices.error(e.notice_text("Could not load the product"));
            }
        }
        Ok(())
    }

    async fn save(&mut self, fields: FormFields) -> Result<(), ShellError> {
        let form = fields.apply(&self.form);

        match self.system.admin.save(form.clone()).await {
            Ok(outcome) => {
                let verb = match outcome {
                    SaveOutcome::Created => "created",
                    SaveOutcome::Updated => "updated",
                };
                self.notices.success(format!("Product {verb}"));
                self.form = ProductForm::default();
                self.show_admin().await
            }
            Err(e) => {
                self.notices.error(e.notice_text("Could not save the product"));
                self.form = form;
                Ok(())
            }
        }
    }

    async fn delete_product(&mut self, id: String) -> Result<(), ShellError> {
        let pending = match self.system.admin.request_delete(id).await {
            Ok(pending) => pending,
            Err(e) => {
                self.notices.error(e.notice_text("Could not delete the product"));
                return Ok(());
            }
        };

        if !self.confirm(&format!("Delete {}?", pending.name)).await? {
            self.notices.info("Deletion cancelled");
            return Ok(());
        }

        match self.system.admin.confirm_delete(pending.id).await {
            Ok(()) => {
                self.notices.success(format!("{} deleted", pending.name));
                self.show_admin().await
            }
            Err(e) => {
                self.notices.error(e.notice_text("Could not delete the product"));
                Ok(())
            }
        }
    }

    // ---- dashboard -----------------------------------------------------

    async fn open_panel(&mut self, panel: &str) -> Result<(), ShellError> {
        self.panels.switch_view(panel);
        self.show_panel().await
    }

    async fn show_panel(&mut self) -> Result<(), ShellError> {
        let records = self.system.records.clone();
        let rendered = match self.panels.active() {
            Some("users") => records.load_users().await.map(|users| view::render_users(&users)),
            Some("employees") => records.load_employees().await.map(|staff| view::render_employees(&staff)),
            _ => records.load_sales().await.map(|sales| view::render_sales(&sales)),
        };
        match rendered {
            Ok(text) => self.say(format!("{}\n{text}", view::render_tabs(&self.panels))),
            Err(e) => {
                self.notices.error(e.notice_text("Could not load the records"));
                Ok(())
            }
        }
    }

    async fn register_sale(&mut self, sale: NewSale) -> Result<(), ShellError> {
        match self.system.records.register_sale(sale).await {
            Ok(sales) => {
                self.notices.success("Sale registered");
                self.panels.switch_view("sales");
                self.say(view::render_sales(&sales))
            }
            Err(e) => {
                self.notices.error(e.notice_text("Could not register the sale"));
                Ok(())
            }
        }
    }

    async fn delete_user(&mut self, id: String) -> Result<(), ShellError> {
        if !self.confirm(&format!("Delete user {id}?")).await? {
            self.notices.info("Deletion cancelled");
            return Ok(());
        }
        match self.system.records.delete_user(id).await {
            Ok(users) => {
                self.notices.success("User deleted");
                self.panels.switch_view("users");
                self.say(view::render_users(&users))
            }
            Err(e) => {
                self.notices.error(e.notice_text("Could not delete the user"));
                Ok(())
            }
        }
    }

    async fn delete_employee(&mut self, id: String) -> Result<(), ShellError> {
        if !self.confirm(&format!("Delete employee {id}?")).await? {
            self.notices.info("Deletion cancelled");
            return Ok(());
        }
        match self.system.records.delete_employee(id).await {
            Ok(staff) => {
                self.notices.success("Employee deleted");
                self.panels.switch_view("employees");
                self.say(view::render_employees(&staff))
            }
            Err(e) => {
                self.notices.error(e.notice_text("Could not delete the employee"));
                Ok(())
            }
        }
    }
}
