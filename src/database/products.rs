use sqlx::SqlitePool;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::models::{NewProduct, Product};

/// Row-level access to the `products` table.
#[derive(Clone)]
pub struct ProductStore {
    pool: SqlitePool,
}

impl ProductStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Window the table by `skip` then `limit`, in creation order.
    /// Bounds are handed to SQLite untouched (negative limit means no limit).
    pub async fn list(&self, skip: i64, limit: i64) -> Result<Vec<Product>, DatabaseError> {
        let rows = sqlx::query_as::<_, Product>(
            "SELECT id, title, description, price FROM products ORDER BY id LIMIT ? OFFSET ?",
        )
        .bind(limit)
        .bind(skip)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn find(&self, id: i64) -> Result<Option<Product>, DatabaseError> {
        let row = sqlx::query_as::<_, Product>("SELECT id, title, description, price FROM products WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    pub async fn find_404(&self, id: i64) -> Result<Product, DatabaseError> {
        self.find(id)
            .await?
            .ok_or_else(|| DatabaseError::NotFound("Product not found".to_string()))
    }

    pub async fn insert(&self, product: NewProduct) -> Result<Product, DatabaseError> {
        let id = sqlx::query("INSERT INTO products (title, description, price) VALUES (?, ?, ?)")
            .bind(&product.title)
            .bind(&product.description)
            .bind(product.price)
            .execute(&self.pool)
            .await?
            .last_insert_rowid();

        Ok(Product {
            id,
            title: product.title,
            description: product.description,
            price: product.price,
        })
    }

    /// Write every column of `product` back to its row.
    pub async fn update(&self, product: &Product) -> Result<(), DatabaseError> {
        let result = sqlx::query("UPDATE products SET title = ?, description = ?, price = ? WHERE id = ?")
            .bind(&product.title)
            .bind(&product.description)
            .bind(product.price)
            .bind(product.id)
            .execute(&self.pool)
            .await?;

        // Deleted by a concurrent request between read and write
        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound("Product not found".to_string()));
        }
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound("Product not found".to_string()));
        }
        Ok(())
    }

    pub async fn count(&self) -> Result<i64, DatabaseError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn ping(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }
}
