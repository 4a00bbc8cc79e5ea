use clap::{Args, Parser, Subcommand};

use crate::domain::{Page, ProductForm};

/// One line typed at the prompt.
#[derive(Debug, Parser)]
#[command(multicall = true)]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in and go to your home screen
    Login { email: String, password: String },
    /// Create a customer account
    Register { email: String, username: String, password: String },
    /// End the session
    Logout,
    /// Open a screen: entry, shop, inventory or dashboard
    Go { page: Page },

    /// Reload and show the catalog
    Catalog,
    /// Add one unit of a product to the cart
    Add { product_id: String },
    /// Show the cart
    Cart,
    /// Change the quantity of a cart line by a signed amount
    Qty {
        line: usize,
        #[arg(allow_negative_numbers = true)]
        delta: i64,
    },
    /// Remove a cart line
    Remove { line: usize },
    /// Buy everything in the cart
    Checkout,
    /// Hide the cart
    Close,

    /// Reload and show the product list
    Products,
    /// Filter the product list by name, platform or genre
    Filter { term: Vec<String> },
    /// Load a product into the form
    Edit { id: String },
    /// Discard the form
    Cancel,
    /// Create a product, or update the one being edited
    Save(FormFields),
    /// Delete a product after confirmation
    Delete { id: String },

    /// Show registered sales
    Sales,
    /// Register a sale
    Sell { product_id: String, quantity: u32, customer: Vec<String> },
    /// Show user accounts
    Users,
    /// Delete a user account after confirmation
    DeleteUser { id: String },
    /// Show employees
    Employees,
    /// Delete an employee after confirmation
    DeleteEmployee { id: String },

    /// Leave the storefront
    #[command(alias = "exit")]
    Quit,
}

/// Form fields given on the `save` line. Omitted fields keep the current form value.
#[derive(Debug, Default, Args)]
pub struct FormFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub platform: Option<String>,
    #[arg(long)]
    pub genre: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub price: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub stock: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
}

impl FormFields {
    pub fn apply(self, form: &ProductForm) -> ProductForm {
        let mut form = form.clone();
        let fields = [
            (self.name, &mut form.name),
            (self.platform, &mut form.platform),
            (self.genre, &mut form.genre),
            (self.price, &mut form.price),
            (self.stock, &mut form.stock),
            (self.description, &mut form.description),
        ];
        for (value, slot) in fields {
            if let Some(value) = value {
                *slot = value;
            }
        }
        form
    }
}

/// Splits a line into words. Double quotes group words and are dropped.
pub fn split_words(line: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quoted = false;

    for c in line.chars() {
        match c {
            '"' => {
                quoted = !quoted;
                in_word = true;
            }
            c if c.is_whitespace() && !quoted => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            c => {
                current.push(c);
                in_word = true;
            }
        }
    }
    if in_word {
        words.push(current);
    }
    words
}
