// ==========================================
// Bakery Cost Calculator - material API
// ==========================================
// Material catalog maintenance. A material still used
// by a recipe cannot be deleted.
// ==========================================

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::api::error::{ApiError, ApiResult};
use crate::api::validator::validate_material_draft;
use crate::domain::material::{Material, MaterialDraft};
use crate::repository::material_repo::MaterialRepository;

// ==========================================
// MaterialApi
// ==========================================
pub struct MaterialApi {
    material_repo: Arc<MaterialRepository>,
}

impl MaterialApi {
    pub fn new(material_repo: Arc<MaterialRepository>) -> Self {
        Self { material_repo }
    }

    // ==========================================
    // Queries
    // ==========================================

    /// All materials, ordered by category then name.
    pub fn list_materials(&self) -> ApiResult<Vec<Material>> {
        let materials = self.material_repo.list_all()?;
        debug!(count = materials.len(), "listed materials");
        Ok(materials)
    }

    /// # Errors
    /// - NotFound: unknown id
    pub fn get_material(&self, material_id: &str) -> ApiResult<Material> {
        if material_id.trim().is_empty() {
            return Err(ApiError::InvalidInput("material id must not be empty".to_string()));
        }
        self.material_repo
            .find_by_id(material_id)?
            .ok_or_else(|| ApiError::NotFound(format!("Material (id={}) does not exist", material_id)))
    }

    // ==========================================
    // Commands
    // ==========================================

    pub fn create_material(&self, mut draft: MaterialDraft) -> ApiResult<Material> {
        draft.name = draft.name.trim().to_string();
        validate_material_draft(&draft)?;

        let material = Material::new(draft);
        self.material_repo.insert(&material)?;

        info!(material_id = %material.id, name = %material.name, "material created");
        Ok(material)
    }

    /// Replace every editable field of a material.
    ///
    /// Existing recipes pick up the new price on their next calculation.
    pub fn update_material(&self, material_id: &str, mut draft: MaterialDraft) -> ApiResult<Material> {
        draft.name = draft.name.trim().to_string();
        validate_material_draft(&draft)?;

        let mut material = self.get_material(material_id)?;
        material.apply(draft);
        self.material_repo.update(&material)?;

        info!(material_id = %material.id, unit_price = material.unit_price, "material updated");
        Ok(material)
    }

    /// Delete a material that no recipe references.
    ///
    /// # Errors
    /// - NotFound: unknown id
    /// - MaterialInUse: at least one recipe line references the material
    pub fn delete_material(&self, material_id: &str) -> ApiResult<()> {
        let material = self.get_material(material_id)?;

        let reference_count = self.material_repo.count_recipe_references(&material.id)?;
        if reference_count > 0 {
            warn!(
                material_id = %material.id,
                reference_count,
                "refusing to delete material still used by recipes"
            );
            return Err(ApiError::MaterialInUse {
                material_id: material.id,
                reference_count,
            });
        }

        self.material_repo.delete(&material.id)?;
        info!(material_id = %material.id, "material deleted");
        Ok(())
    }
}
