use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::Result;
use crate::models::{PersonRow, ProfileSource};

/// One person with catalog descriptions. A person may hold several patient
/// cards; the insurer comes from the oldest one.
const PERSON_SQL: &str = r#"
    SELECT
        p.id AS person_id,
        p.id_tipoid AS document_type_id,
        tipo.descripcion AS document_type,
        p.numeroid AS document_number,
        p.nombre1 AS first_name,
        p.nombre2 AS middle_name,
        p.apellido1 AS last_name,
        p.apellido2 AS second_last_name,
        p.fechanac AS birth_date,
        p.id_sexobiologico AS sex_id,
        sexo.nombre AS sex,
        p.direccion AS address,
        p.tel_movil AS mobile_phone,
        p.email AS email,
        eps.codigo AS insurer_code,
        eps.razonsocial AS insurer_name
    FROM gen_m_persona p
    LEFT JOIN gen_p_listaopcion tipo ON p.id_tipoid = tipo.id AND tipo.variable = 'TipoIdentificacion'
    LEFT JOIN gen_p_listaopcion sexo ON p.id_sexobiologico = sexo.id AND sexo.variable = 'SexoBiologico'
    LEFT JOIN fac_m_tarjetero t ON p.id = t.id_persona
    LEFT JOIN gen_p_eps eps ON t.id_eps = eps.id
    WHERE p.id = $1
    ORDER BY t.id
    LIMIT 1
"#;

pub struct ProfileRepository {
    pool: PgPool,
}

impl ProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileSource for ProfileRepository {
    async fn find_person(&self, person_id: i32) -> Result<Option<PersonRow>> {
        let row = sqlx::query_as::<_, PersonRow>(PERSON_SQL)
            .bind(person_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }
}
