use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        auth::ChefId,
        menu::{CreateMenuRequest, Menu, MenuItem, MenuWithItems, UpdateMenuRequest},
    },
};

const MENU_COLUMNS: &str = "id, chef_id, name, dish_count, price_cents, description, created_at";

const ITEM_SELECT: &str = "SELECT mi.id, mi.menu_id, mi.dish_id, mi.sort_order,
            d.name AS dish_name, d.category, d.image_url
     FROM menu_items mi
     JOIN dishes d ON d.id = mi.dish_id";

pub struct MenuService;

impl MenuService {
    /// All menus of a chef with their dishes, newest menu first.
    pub async fn list(pool: &PgPool, chef_id: Uuid) -> AppResult<Vec<MenuWithItems>> {
        let menus = sqlx::query_as::<_, Menu>(&format!(
            "SELECT {MENU_COLUMNS} FROM menus WHERE chef_id = $1 ORDER BY created_at DESC"
        ))
        .bind(chef_id)
        .fetch_all(pool)
        .await?;

        let ids: Vec<Uuid> = menus.iter().map(|m| m.id).collect();
        let items = sqlx::query_as::<_, MenuItem>(&format!(
            "{ITEM_SELECT} WHERE mi.menu_id = ANY($1) ORDER BY mi.sort_order"
        ))
        .bind(&ids)
        .fetch_all(pool)
        .await?;

        Ok(group_items(menus, items))
    }

    pub async fn create(pool: &PgPool, chef: ChefId, req: &CreateMenuRequest) -> AppResult<Menu> {
        validate_fields(Some(req.name.as_str()), Some(req.dish_count), Some(req.price_cents))?;
        let menu = sqlx::query_as::<_, Menu>(&format!(
            "INSERT INTO menus (chef_id, name, dish_count, price_cents, description)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {MENU_COLUMNS}"
        ))
        .bind(chef.0)
        .bind(req.name.trim())
        .bind(req.dish_count)
        .bind(req.price_cents)
        .bind(&req.description)
        .fetch_one(pool)
        .await?;
        Ok(menu)
    }

    pub async fn update(
        pool: &PgPool,
        chef: ChefId,
        id: Uuid,
        req: &UpdateMenuRequest,
    ) -> AppResult<Menu> {
        validate_fields(req.name.as_deref(), req.dish_count, req.price_cents)?;
        sqlx::query_as::<_, Menu>(&format!(
            "UPDATE menus
             SET name = COALESCE($1, name),
                 dish_count = COALESCE($2, dish_count),
                 price_cents = COALESCE($3, price_cents),
                 description = COALESCE($4, description)
             WHERE id = $5 AND chef_id = $6
             RETURNING {MENU_COLUMNS}"
        ))
        .bind(req.name.as_deref().map(str::trim))
        .bind(req.dish_count)
        .bind(req.price_cents)
        .bind(&req.description)
        .bind(id)
        .bind(chef.0)
        .fetch_optional(pool)
        .await?
        .ok_or(AppError::NotFound("Menu"))
    }

    /// Menus that already have orders cannot be deleted (409).
    pub async fn delete(pool: &PgPool, chef: ChefId, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM menus WHERE id = $1 AND chef_id = $2")
            .bind(id)
            .bind(chef.0)
            .execute(pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Menu"));
        }
        Ok(())
    }

    /// Append a dish to a menu. Adding a dish that is already there returns
    /// the existing item.
    pub async fn add_item(
        pool: &PgPool,
        chef: ChefId,
        menu_id: Uuid,
        dish_id: Uuid,
    ) -> AppResult<MenuItem> {
        ensure_owned_menu(pool, chef, menu_id).await?;

        let owns_dish: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM dishes WHERE id = $1 AND chef_id = $2)",
        )
        .bind(dish_id)
        .bind(chef.0)
        .fetch_one(pool)
        .await?;
        if !owns_dish {
            return Err(AppError::NotFound("Dish"));
        }

        sqlx::query(
            "INSERT INTO menu_items (menu_id, dish_id, sort_order)
             SELECT $1, $2, COALESCE(MAX(sort_order), 0) + 1 FROM menu_items WHERE menu_id = $1
             ON CONFLICT (menu_id, dish_id) DO NOTHING",
        )
        .bind(menu_id)
        .bind(dish_id)
        .execute(pool)
        .await?;

        let item = sqlx::query_as::<_, MenuItem>(&format!(
            "{ITEM_SELECT} WHERE mi.menu_id = $1 AND mi.dish_id = $2"
        ))
        .bind(menu_id)
        .bind(dish_id)
        .fetch_one(pool)
        .await?;
        Ok(item)
    }

    pub async fn remove_item(
        pool: &PgPool,
        chef: ChefId,
        menu_id: Uuid,
        item_id: Uuid,
    ) -> AppResult<()> {
        ensure_owned_menu(pool, chef, menu_id).await?;
        let result = sqlx::query("DELETE FROM menu_items WHERE id = $1 AND menu_id = $2")
            .bind(item_id)
            .bind(menu_id)
            .execute(pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Menu item"));
        }
        Ok(())
    }

    /// Copy a menu and its items under the name "<name> (copy)".
    pub async fn duplicate(pool: &PgPool, chef: ChefId, menu_id: Uuid) -> AppResult<Menu> {
        let mut tx = pool.begin().await?;

        let copy = sqlx::query_as::<_, Menu>(&format!(
            "INSERT INTO menus (chef_id, name, dish_count, price_cents, description)
             SELECT chef_id, name || ' (copy)', dish_count, price_cents, description
             FROM menus WHERE id = $1 AND chef_id = $2
             RETURNING {MENU_COLUMNS}"
        ))
        .bind(menu_id)
        .bind(chef.0)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(AppError::NotFound("Menu"))?;

        sqlx::query(
            "INSERT INTO menu_items (menu_id, dish_id, sort_order)
             SELECT $1, dish_id, sort_order FROM menu_items WHERE menu_id = $2",
        )
        .bind(copy.id)
        .bind(menu_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(copy)
    }

    /// Append the dishes of another own menu that `menu_id` does not have yet.
    /// Returns how many items were added.
    pub async fn import_items(
        pool: &PgPool,
        chef: ChefId,
        menu_id: Uuid,
        source_menu_id: Uuid,
    ) -> AppResult<u64> {
        if menu_id == source_menu_id {
            return Err(AppError::validation("cannot import a menu into itself"));
        }
        ensure_owned_menu(pool, chef, menu_id).await?;
        ensure_owned_menu(pool, chef, source_menu_id).await?;

        let result = sqlx::query(
            "INSERT INTO menu_items (menu_id, dish_id, sort_order)
             SELECT $1, src.dish_id,
                    (SELECT COALESCE(MAX(sort_order), 0) FROM menu_items WHERE menu_id = $1)
                      + ROW_NUMBER() OVER (ORDER BY src.sort_order)
             FROM menu_items src
             WHERE src.menu_id = $2
               AND NOT EXISTS (
                   SELECT 1 FROM menu_items cur WHERE cur.menu_id = $1 AND cur.dish_id = src.dish_id
               )
             ON CONFLICT (menu_id, dish_id) DO NOTHING",
        )
        .bind(menu_id)
        .bind(source_menu_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}

async fn ensure_owned_menu(pool: &PgPool, chef: ChefId, menu_id: Uuid) -> AppResult<()> {
    let owned: bool =
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM menus WHERE id = $1 AND chef_id = $2)")
            .bind(menu_id)
            .bind(chef.0)
            .fetch_one(pool)
            .await?;
    if owned {
        Ok(())
    } else {
        Err(AppError::NotFound("Menu"))
    }
}

fn validate_fields(name: Option<&str>, dish_count: Option<i32>, price_cents: Option<i64>) -> AppResult<()> {
    if name.is_some_and(|n| n.trim().is_empty()) {
        return Err(AppError::validation("name cannot be empty"));
    }
    if dish_count.is_some_and(|c| c < 0) {
        return Err(AppError::validation("dish_count cannot be negative"));
    }
    if price_cents.is_some_and(|p| p < 0) {
        return Err(AppError::validation("price_cents cannot be negative"));
    }
    Ok(())
}

/// Attach items to their menus, keeping the menus' order.
fn group_items(menus: Vec<Menu>, items: Vec<MenuItem>) -> Vec<MenuWithItems> {
    let mut grouped: Vec<MenuWithItems> = menus
        .into_iter()
        .map(|menu| MenuWithItems { menu, items: Vec::new() })
        .collect();
    for item in items {
        if let Some(entry) = grouped.iter_mut().find(|m| m.menu.id == item.menu_id) {
            entry.items.push(item);
        }
    }
    grouped
}
