use crate::commands::{print_json, Context};
use crate::error::{invalid_input, not_found};
use crate::util::{now_utc, parse_owner_id};
use anyhow::Result;
use clap::Args;
use vetbase_store::repo::OwnerNew;

#[derive(Debug, Args)]
pub struct AddOwnerArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub phone: String,
}

#[derive(Debug, Args)]
pub struct EditOwnerArgs {
    pub id: String,
    #[arg(long)]
    pub phone: String,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    pub id: String,
}

#[derive(Debug, Args)]
pub struct ListArgs {}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    pub id: String,
}

pub fn add_owner(ctx: &Context<'_>, args: AddOwnerArgs) -> Result<()> {
    let owner = ctx.store.owners().create(
        now_utc(),
        OwnerNew {
            name: args.name,
            address: args.address,
            phone: args.phone,
        },
    )?;

    if ctx.json {
        return print_json(&owner);
    }
    println!("Added owner {} ({})", owner.name, owner.id);
    Ok(())
}

pub fn edit_owner(ctx: &Context<'_>, args: EditOwnerArgs) -> Result<()> {
    if args.phone.trim().is_empty() {
        return Err(invalid_input("phone cannot be empty"));
    }
    let id = parse_owner_id(&args.id)?;
    let owner = ctx.store.owners().update_phone(now_utc(), id, &args.phone)?;

    if ctx.json {
        return print_json(&owner);
    }
    println!("Updated phone for {} to {}", owner.name, owner.phone);
    Ok(())
}

pub fn show_owner(ctx: &Context<'_>, args: ShowArgs) -> Result<()> {
    let id = parse_owner_id(&args.id)?;
    let owner = ctx
        .store
        .owners()
        .get(id)?
        .ok_or_else(|| not_found(format!("owner {id}")))?;

    if ctx.json {
        return print_json(&owner);
    }
    println!("{} ({})", owner.name, owner.id);
    if let Some(address) = &owner.address {
        println!("  address: {address}");
    }
    println!("  phone: {}", owner.phone);
    Ok(())
}

pub fn list_owners(ctx: &Context<'_>, _args: ListArgs) -> Result<()> {
    let owners = ctx.store.owners().list()?;

    if ctx.json {
        return print_json(&owners);
    }
    for owner in owners {
        println!("{}  {}  {}", owner.id, owner.name, owner.phone);
    }
    Ok(())
}

pub fn delete_owner(ctx: &Context<'_>, args: DeleteArgs) -> Result<()> {
    let id = parse_owner_id(&args.id)?;
    ctx.store.owners().delete(id)?;
    if !ctx.json {
        println!("Deleted owner {id}");
    }
    Ok(())
}
